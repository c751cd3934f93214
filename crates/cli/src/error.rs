// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types.
//!
//! Policy denials are not errors: they are reported through `EditStatus` and
//! `PermissionGate`. Only collaborator failures and engine failures surface as
//! `Err` and are left for the host to handle.

use crate::expansion::ExpansionError;
use thiserror::Error;

/// Failure of an external collaborator (page storage or principal store).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{store} unavailable: {message}")]
    Unavailable {
        store: &'static str,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn unavailable(store: &'static str, message: impl Into<String>) -> Self {
        Self::Unavailable {
            store,
            message: message.into(),
        }
    }
}

/// Errors surfaced by the decision coordinator.
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("expansion failed: {0}")]
    Expansion(#[from] ExpansionError),

    #[error("invalid edit lifecycle transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}
