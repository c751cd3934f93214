// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-request state owned by the caller.
//!
//! Nothing here is process-wide. A `RequestContext` lives for one edit
//! request and a `PermissionBurst` for one batch of permission checks.

use crate::page::{PageId, Principal};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// How the current request is being executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionContext {
    /// A user working through the web interface
    #[default]
    Interactive,
    /// Maintenance scripts and other command-line runs
    Batch,
}

/// Correlates the draft shown in the edit form with the notices computed
/// for it later in the same request.
#[derive(Clone, Debug)]
pub struct RequestContext {
    id: Uuid,
    execution: ExecutionContext,
    draft: Option<String>,
}

impl RequestContext {
    pub fn new(execution: ExecutionContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            execution,
            draft: None,
        }
    }

    pub fn interactive() -> Self {
        Self::new(ExecutionContext::Interactive)
    }

    pub fn batch() -> Self {
        Self::new(ExecutionContext::Batch)
    }

    /// Identifier used to correlate log lines of one request.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn execution(&self) -> ExecutionContext {
        self.execution
    }

    pub fn is_batch(&self) -> bool {
        self.execution == ExecutionContext::Batch
    }

    /// Store the edit form content, replacing any earlier draft.
    pub fn capture_draft(&mut self, text: impl Into<String>) {
        self.draft = Some(text.into());
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    /// Read the draft once, leaving the slot empty.
    pub fn take_draft(&mut self) -> Option<String> {
        self.draft.take()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::interactive()
    }
}

/// Memoized edit eligibility for one batch of permission checks.
///
/// Keyed by principal and page so a burst handed to the wrong principal
/// can never answer for someone else. Drop it when the burst ends.
#[derive(Clone, Debug, Default)]
pub struct PermissionBurst {
    verdicts: HashMap<(Principal, PageId), bool>,
}

impl PermissionBurst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached eligibility, if this page was already checked.
    pub fn get(&self, principal: &Principal, page: &PageId) -> Option<bool> {
        self.verdicts
            .get(&(principal.clone(), page.clone()))
            .copied()
    }

    pub fn insert(&mut self, principal: &Principal, page: &PageId, may_edit: bool) {
        self.verdicts
            .insert((principal.clone(), page.clone()), may_edit);
    }

    /// Return the cached answer or compute and cache it.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        principal: &Principal,
        page: &PageId,
        compute: impl FnOnce() -> Result<bool, E>,
    ) -> Result<bool, E> {
        if let Some(may_edit) = self.get(principal, page) {
            return Ok(may_edit);
        }
        let may_edit = compute()?;
        self.insert(principal, page, may_edit);
        Ok(may_edit)
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
