// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recorded decision types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Integration point at which a decision was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionPoint {
    /// Edit notices shown above the edit form
    EditNotice,
    /// Syntactic pre-commit filter
    ContentFilter,
    /// Authoritative commit-time veto
    CommitVeto,
    /// Edit permission gate on read
    PermissionGate,
}

impl DecisionPoint {
    /// Stable name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditNotice => "edit_notice",
            Self::ContentFilter => "content_filter",
            Self::CommitVeto => "commit_veto",
            Self::PermissionGate => "permission_gate",
        }
    }
}

/// Outcome of a single decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionOutcome {
    /// The operation may proceed
    Allowed,
    /// A warning notice was emitted
    Warned { message_key: String },
    /// The operation was denied
    Denied { message_key: String, fatal: bool },
}

impl DecisionOutcome {
    /// Whether this outcome denied the operation.
    pub fn is_denial(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }
}

/// A decision as reported by the gate, before sequencing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub point: DecisionPoint,
    /// Prefixed page title
    pub page: String,
    /// Acting principal name
    pub principal: String,
    pub outcome: DecisionOutcome,
}

impl DecisionRecord {
    pub fn new(
        point: DecisionPoint,
        page: impl Into<String>,
        principal: impl Into<String>,
        outcome: DecisionOutcome,
    ) -> Self {
        Self {
            point,
            page: page.into(),
            principal: principal.into(),
            outcome,
        }
    }
}

/// A decision with its position in the log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedDecision {
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(with = "millis")]
    pub elapsed: Duration,
    #[serde(flatten)]
    pub record: DecisionRecord,
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
