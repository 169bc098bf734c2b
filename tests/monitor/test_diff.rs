// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Unified diff rendering properties

use pagewatch::monitor::{unified_diff, UNRENDERABLE_CHANGE};

#[test]
fn diff_labels_previous_and_current() {
    let diff = unified_diff("old line", "new line");
    assert!(diff.starts_with("--- previous\n+++ current\n"));
}

#[test]
fn diff_surrounds_changes_with_context() {
    let old = "one\ntwo\nthree\nfour\nfive\nsix\nseven";
    let new = "one\ntwo\nthree\nCHANGED\nfive\nsix\nseven";
    let diff = unified_diff(old, new);

    // Three lines of context on both sides of the changed region
    assert!(diff.contains(" one\n"));
    assert!(diff.contains(" three\n"));
    assert!(diff.contains("-four\n"));
    assert!(diff.contains("+CHANGED\n"));
    assert!(diff.contains(" seven\n"));
}

#[test]
fn diff_is_nonempty_whenever_texts_differ_by_a_line() {
    let cases = [
        ("a", "b"),
        ("a\nb", "a"),
        ("a", "a\nb"),
        ("x\ny\nz", "x\nq\nz"),
    ];
    for (old, new) in cases {
        let diff = unified_diff(old, new);
        assert_ne!(diff, UNRENDERABLE_CHANGE, "{:?} -> {:?}", old, new);
        assert!(!diff.is_empty());
    }
}

#[test]
fn line_invisible_difference_falls_back_to_sentinel() {
    assert_eq!(unified_diff("a\nb", "a\nb\n"), UNRENDERABLE_CHANGE);
}

#[test]
fn large_texts_still_produce_a_diff() {
    let old: String = (0..5000).map(|i| format!("row {}\n", i)).collect();
    let new = old.replace("row 2500\n", "row two-five-zero-zero\n");
    let diff = unified_diff(&old, &new);
    assert!(diff.contains("-row 2500\n"));
    assert!(diff.contains("+row two-five-zero-zero\n"));
}
