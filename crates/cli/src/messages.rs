// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing messages.
//!
//! The gate only ever hands out message keys. Rendering and localization are
//! left to the host.

use serde::{Deserialize, Serialize};

/// Message keys emitted by the gate.
pub mod keys {
    /// Edit notice: the page contains raw HTML the user may not edit
    pub const HTML_DETECTED_IN_EDIT_PAGE: &str = "saferhtmltag-html-detected-in-edit-page";
    /// Non-fatal rejection by the pre-commit filter, also used by the
    /// permission gate
    pub const DENIED_EDIT: &str = "saferhtmltag-denied-edit";
    /// Fatal commit-time veto
    pub const DENIED_SAVE: &str = "saferhtmltag-denied-save";
    /// Fatal commit-time veto when the content could not be fully expanded
    pub const EXPANSION_TOO_COMPLEX: &str = "saferhtmltag-expansion-too-complex";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
    /// An error that ends the operation
    Fatal,
}

/// A message identified by key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub key: String,
    pub severity: Severity,
}

impl Message {
    pub fn warning(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            severity: Severity::Error,
        }
    }

    pub fn fatal(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            severity: Severity::Fatal,
        }
    }
}

/// Receiver for messages raised while deciding.
pub trait MessageSink {
    fn emit_warning(&mut self, key: &str);

    fn emit_error(&mut self, key: &str, fatal: bool);
}

/// Edit notices collected for the edit form.
impl MessageSink for Vec<Message> {
    fn emit_warning(&mut self, key: &str) {
        self.push(Message::warning(key));
    }

    fn emit_error(&mut self, key: &str, fatal: bool) {
        self.push(if fatal {
            Message::fatal(key)
        } else {
            Message::error(key)
        });
    }
}

/// Result object of an edit operation.
///
/// Starts out ok. Any error marks it as failed; a fatal error additionally
/// means the edit cannot be resubmitted as is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditStatus {
    ok: bool,
    messages: Vec<Message>,
}

impl Default for EditStatus {
    fn default() -> Self {
        Self {
            ok: true,
            messages: Vec::new(),
        }
    }
}

impl EditStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn set_ok(&mut self, ok: bool) {
        self.ok = ok;
    }

    /// Whether a fatal error was recorded.
    pub fn is_fatal(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Fatal)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn has_message(&self, key: &str) -> bool {
        self.messages.iter().any(|m| m.key == key)
    }

    /// Record a non-fatal error.
    pub fn error(&mut self, key: &str) {
        self.messages.push(Message::error(key));
        self.ok = false;
    }

    /// Record a fatal error.
    pub fn fatal(&mut self, key: &str) {
        self.messages.push(Message::fatal(key));
        self.ok = false;
    }
}

impl MessageSink for EditStatus {
    fn emit_warning(&mut self, key: &str) {
        self.messages.push(Message::warning(key));
    }

    fn emit_error(&mut self, key: &str, fatal: bool) {
        if fatal {
            self.fatal(key);
        } else {
            self.error(key);
        }
    }
}

#[cfg(test)]
#[path = "messages_tests.rs"]
mod tests;
