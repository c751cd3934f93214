// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Raw HTML edit gate
//!
//! Decides whether an edit that contains the `<html>` extension tag may be
//! saved. Only principals holding the raw HTML permission (or belonging to an
//! editor group) may add, keep or change such markup; everyone else is warned
//! when the form opens, rejected by a fast syntactic filter, and finally
//! vetoed at commit time when a full expansion of the content reaches the tag.
//!
#![doc = include_str!("../README.md")]

/// Re-exported decision audit types from the htmlgate-capture crate.
pub mod audit {
    pub use htmlgate_capture::{
        DecisionLog, DecisionOutcome, DecisionPoint, DecisionRecord, RecordedDecision,
    };
}
#[doc(hidden)]
pub mod cli;
pub mod config;
pub mod context;
pub mod coordinator;
pub mod detect;
pub mod env;
pub mod error;
pub mod expansion;
pub mod hooks;
pub mod lifecycle;
pub mod messages;
#[doc(hidden)]
pub mod output;
pub mod page;
pub mod permission;
#[doc(hidden)]
pub mod run;
pub mod stores;

pub use config::GateConfig;
pub use coordinator::DecisionCoordinator;
pub use error::{GateError, StoreError};
pub use hooks::{HookPoint, HtmlGate};
