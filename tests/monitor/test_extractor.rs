// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extraction strategy priority ordering

use pagewatch::{ContentExtractor, ExtractionError};

const FULL_PAGE: &str = r#"
    <html>
    <body>
        <nav>Navigation bar</nav>
        <div id="content">
            <p>This page carries a long-form article whose paragraphs add up to a
            healthy amount of prose, comfortably past the readability threshold
            that separates main content from boilerplate fragments.</p>
            <p>A follow-up paragraph continues with enough additional sentences
            that the density heuristic keeps preferring this container.</p>
        </div>
        <div id="price">$19.99</div>
        <footer>All rights reserved</footer>
    </body>
    </html>
"#;

#[test]
fn readability_wins_over_selector_when_enabled() {
    let extractor = ContentExtractor::new(Some("#price".to_string()), true);
    let text = extractor.extract(FULL_PAGE).unwrap();
    assert!(text.contains("long-form article"));
    assert!(!text.contains("$19.99"));
}

#[test]
fn selector_wins_when_readability_disabled() {
    let extractor = ContentExtractor::new(Some("#price".to_string()), false);
    let text = extractor.extract(FULL_PAGE).unwrap();
    assert_eq!(text, "$19.99");
}

#[test]
fn selector_miss_is_empty_string() {
    let extractor = ContentExtractor::new(Some(".does-not-exist".to_string()), false);
    assert_eq!(extractor.extract(FULL_PAGE).unwrap(), "");
}

#[test]
fn fallback_chain_reaches_content_region() {
    let extractor = ContentExtractor::new(None, false);
    let text = extractor.extract(FULL_PAGE).unwrap();
    assert!(text.contains("long-form article"));
    assert!(!text.contains("Navigation bar"));
}

#[test]
fn readability_failure_falls_through_to_fallbacks() {
    // Too little paragraph text for the readability pass
    let html = "<html><body><main><p>tiny</p></main></body></html>";
    let extractor = ContentExtractor::new(None, true);
    assert_eq!(extractor.extract(html).unwrap(), "tiny");
}

#[test]
fn empty_document_reports_no_content() {
    let extractor = ContentExtractor::new(None, false);
    assert_eq!(
        extractor.extract(""),
        Err(ExtractionError::NoContentFound)
    );
}

#[test]
fn extraction_is_pure() {
    let extractor = ContentExtractor::new(None, false);
    let a = extractor.extract(FULL_PAGE).unwrap();
    let b = extractor.extract(FULL_PAGE).unwrap();
    assert_eq!(a, b);
}
