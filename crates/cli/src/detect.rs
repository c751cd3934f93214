// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Syntactic detection of the restricted raw HTML construct.
//!
//! This is a cheap substring check used to reject edits early and to decide
//! whether edit notices are needed. It recognizes two spellings:
//!
//! - the literal opening tag `<html>`
//! - the generic tag function `{{#tag:html ...}}`, with any whitespace inside
//!
//! Matching is exact and case-sensitive. `<HTML>`, `<html class="x">` and
//! homoglyph tricks are not recognized here; the expansion pass run at commit
//! time catches those.

use serde::{Deserialize, Serialize};

/// Name of the restricted extension tag.
pub const RESTRICTED_TAG: &str = "html";

const RESTRICTED_TAG_OPEN: &str = "<html>";
const TAG_FUNCTION_CALL: &str = "{{#tag:html";

/// Whether the content contains the restricted construct.
pub fn has_restricted_markup(content: Option<&str>) -> bool {
    let Some(content) = content.filter(|c| !c.is_empty()) else {
        return false;
    };

    if content.contains(RESTRICTED_TAG_OPEN) {
        return true;
    }

    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    compact.contains(TAG_FUNCTION_CALL)
}

/// How a verdict was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Substring inspection of the raw content
    Syntactic,
    /// Full expansion through the markup engine
    Semantic,
}

/// Result of one detection pass. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionVerdict {
    pub has_restricted_tag: bool,
    pub confidence: Confidence,
}

impl DetectionVerdict {
    pub fn syntactic(has_restricted_tag: bool) -> Self {
        Self {
            has_restricted_tag,
            confidence: Confidence::Syntactic,
        }
    }

    pub fn semantic(has_restricted_tag: bool) -> Self {
        Self {
            has_restricted_tag,
            confidence: Confidence::Semantic,
        }
    }
}

/// Run the syntactic detector and wrap its answer as a verdict.
pub fn syntactic_verdict(content: Option<&str>) -> DetectionVerdict {
    DetectionVerdict::syntactic(has_restricted_markup(content))
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
