// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by htmlgate are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

// Re-export name constants for callers that need the raw name string.
pub use names::*;

use std::path::PathBuf;

/// `HTMLGATE_CONFIG`: Path to the gate configuration file.
pub fn config_path() -> Option<PathBuf> {
    non_empty(names::HTMLGATE_CONFIG).map(PathBuf::from)
}

/// `HTMLGATE_AUDIT_LOG`: JSONL file receiving every decision.
pub fn audit_log_path() -> Option<PathBuf> {
    non_empty(names::HTMLGATE_AUDIT_LOG).map(PathBuf::from)
}

/// `HTMLGATE_LOG`: Log filter directive, takes precedence over `RUST_LOG`.
pub fn log_filter() -> Option<String> {
    non_empty(names::HTMLGATE_LOG)
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
