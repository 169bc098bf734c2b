// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Selector and fallback-chain extraction

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use super::readability::extract_readable;

/// Structural candidates tried when no selector is configured, in order
const FALLBACK_SELECTORS: [&str; 5] = ["main", "#content", ".content", "article", "body"];

/// Elements whose text never contributes to extraction
const NOISE_TAGS: [&str; 2] = ["script", "style"];

/// Elements that terminate a line of extracted text
const BLOCK_TAGS: [&str; 19] = [
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "br", "tr", "table",
    "section", "article", "header", "footer", "blockquote",
];

/// Errors that can occur during content extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// Every fallback including `body` yielded nothing
    #[error("no content found in document")]
    NoContentFound,
}

/// Extracts canonical text from raw markup
///
/// Pure transformation; holds only the per-target extraction settings.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    selector: Option<String>,
    use_readability: bool,
}

impl ContentExtractor {
    /// Create an extractor with an optional CSS selector and the
    /// readability-pass toggle
    pub fn new(selector: Option<String>, use_readability: bool) -> Self {
        Self {
            selector,
            use_readability,
        }
    }

    /// Extract the relevant text from `html`
    ///
    /// A configured selector that matches nothing yields an empty string,
    /// not an error; the caller records it as a zero-length snapshot so a
    /// later appearance of content registers as a change.
    pub fn extract(&self, html: &str) -> Result<String, ExtractionError> {
        if self.use_readability {
            if let Some(text) = extract_readable(html) {
                if !text.is_empty() {
                    return Ok(text);
                }
            }
        }

        let document = Html::parse_document(html);

        if let Some(ref selector) = self.selector {
            let text = match Selector::parse(selector) {
                Ok(sel) => document
                    .select(&sel)
                    .next()
                    .map(|el| clean_text(&element_text(&el)))
                    .unwrap_or_default(),
                // Unparsable selectors are rejected at target construction;
                // treat a stray one the same as no match.
                Err(_) => String::new(),
            };
            return Ok(text);
        }

        for candidate in FALLBACK_SELECTORS {
            if let Ok(sel) = Selector::parse(candidate) {
                if let Some(element) = document.select(&sel).next() {
                    let text = clean_text(&element_text(&element));
                    if !text.is_empty() {
                        return Ok(text);
                    }
                }
            }
        }

        Err(ExtractionError::NoContentFound)
    }
}

/// Collect the text of an element, skipping script/style subtrees and
/// breaking lines at block-level boundaries
pub(crate) fn element_text(element: &ElementRef) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: &ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(el) = ElementRef::wrap(child) {
            let name = el.value().name();
            if NOISE_TAGS.contains(&name) {
                continue;
            }
            collect_text(&el, out);
            if BLOCK_TAGS.contains(&name) {
                out.push('\n');
            }
        }
    }
}

/// Normalize whitespace within lines and drop empty lines
pub(crate) fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
