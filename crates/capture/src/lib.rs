// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decision capture and recording for the htmlgate edit gate.
//!
//! Every decision the gate takes (edit notices, the pre-commit filter, the
//! commit-time veto and the edit permission gate) can be recorded here, in
//! memory and optionally as JSONL, for auditing and test assertions.

mod log;
mod record;

pub use log::DecisionLog;
pub use record::{DecisionOutcome, DecisionPoint, DecisionRecord, RecordedDecision};
