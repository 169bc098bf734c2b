// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Readability-style main-content extraction
//!
//! Selector-independent heuristic: paragraph-bearing containers are
//! scored by the total text length of their direct `<p>` children and
//! the densest container wins. Boilerplate (navigation, footers, script
//! and style) contributes nothing because it rarely lives in paragraphs
//! and noise tags are stripped during text collection.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

use super::extractor::{clean_text, element_text};

/// Minimum cleaned length for a container to count as main content
const MIN_READABLE_CHARS: usize = 200;

/// Extract the main readable content from a document
///
/// Returns `None` when no container accumulates enough paragraph text,
/// letting the caller fall through to the next extraction strategy.
pub fn extract_readable(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let paragraphs = Selector::parse("p").ok()?;

    let mut scores = HashMap::new();
    for paragraph in document.select(&paragraphs) {
        let Some(parent) = paragraph.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        let text_len = paragraph.text().map(str::len).sum::<usize>();
        let entry = scores.entry(parent.id()).or_insert((0usize, parent));
        entry.0 += text_len;
    }

    let (_, best) = scores.into_values().max_by_key(|(score, _)| *score)?;
    let text = clean_text(&element_text(&best));
    if text.len() >= MIN_READABLE_CHARS {
        Some(text)
    } else {
        None
    }
}
