// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML content extraction
//!
//! Turns raw fetched markup into a canonical text string. Strategies
//! are tried in priority order:
//! 1. Readability pass (when enabled): selector-independent main-content
//!    heuristic, used unconditionally when it yields text
//! 2. Explicit CSS selector: trimmed text of the first match, empty
//!    string on no match
//! 3. Structural fallback chain: `main`, `#content`, `.content`,
//!    `article`, then `body`, with script/style stripped throughout

pub mod extractor;
pub mod readability;

pub use extractor::{ContentExtractor, ExtractionError};
pub use readability::extract_readable;
