// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Change detection state machine properties

use pagewatch::{ChangeDetector, ContentHash, ObservationResult};

#[test]
fn digest_is_stable_across_calls() {
    let text = "The quick brown fox\njumps over the lazy dog";
    let first = ContentHash::digest(text);
    for _ in 0..10 {
        assert_eq!(ContentHash::digest(text), first);
    }
}

#[test]
fn first_observation_is_always_initial() {
    for content in ["", "Hello", "<unextracted markup>", "multi\nline\ntext"] {
        let mut detector = ChangeDetector::new();
        let result = detector.observe(content.to_string());
        assert!(
            matches!(result, ObservationResult::Initial { .. }),
            "first observation of {:?} must be Initial",
            content
        );
    }
}

#[test]
fn hello_then_hello_is_initial_then_unchanged() {
    let mut detector = ChangeDetector::new();

    let first = detector.observe("Hello".to_string());
    let second = detector.observe("Hello".to_string());

    match first {
        ObservationResult::Initial { snapshot } => assert_eq!(snapshot.text, "Hello"),
        other => panic!("expected Initial, got {}", other.status()),
    }
    assert!(matches!(second, ObservationResult::Unchanged { .. }));
}

#[test]
fn line_change_produces_diff_showing_the_line() {
    let mut detector = ChangeDetector::new();
    detector.observe("A\nB\nC".to_string());

    match detector.observe("A\nX\nC".to_string()) {
        ObservationResult::Changed { diff, .. } => {
            assert!(diff.contains("-B"), "diff should remove B:\n{}", diff);
            assert!(diff.contains("+X"), "diff should add X:\n{}", diff);
        }
        other => panic!("expected Changed, got {}", other.status()),
    }
}

#[test]
fn whitespace_invisible_change_yields_sentinel_diff() {
    let mut detector = ChangeDetector::new();
    detector.observe("line one\nline two".to_string());

    // Trailing newline changes the digest but not the line sequence
    match detector.observe("line one\nline two\n".to_string()) {
        ObservationResult::Changed { diff, .. } => {
            assert_eq!(diff, pagewatch::monitor::UNRENDERABLE_CHANGE);
        }
        other => panic!("expected Changed, got {}", other.status()),
    }
}

#[test]
fn unchanged_does_not_replace_snapshot() {
    let mut detector = ChangeDetector::new();
    detector.observe("stable".to_string());
    let captured = detector.last_snapshot().unwrap().captured_at;

    detector.observe("stable".to_string());
    assert_eq!(detector.last_snapshot().unwrap().captured_at, captured);
}

#[test]
fn changed_replaces_snapshot() {
    let mut detector = ChangeDetector::new();
    detector.observe("before".to_string());
    detector.observe("after".to_string());
    assert_eq!(detector.last_snapshot().unwrap().text, "after");
}
