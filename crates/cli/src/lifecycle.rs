// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-edit state machine.
//!
//! ```text
//! FormRendered -> NoticeComputed -> FastFilterChecked -> CommitVetoChecked -> Committed
//!                                         \                      \
//!                                          Rejected(FastFilter)   Rejected(Veto)
//! ```
//!
//! Rejected and committed edits are terminal; a resubmission starts a new
//! lifecycle.

use crate::context::RequestContext;
use crate::coordinator::{DecisionCoordinator, FilterOutcome, VetoOutcome, VetoReason};
use crate::error::GateError;
use crate::messages::{Message, MessageSink};
use crate::page::{EditCandidate, PageId, Principal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which check refused the edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "reason", rename_all = "snake_case")]
pub enum Rejection {
    FastFilter,
    Veto(VetoReason),
}

impl Rejection {
    pub fn message_key(&self) -> &'static str {
        match self {
            Rejection::FastFilter => crate::messages::keys::DENIED_EDIT,
            Rejection::Veto(reason) => reason.message_key(),
        }
    }
}

/// Current step of one edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditState {
    FormRendered { draft_captured: bool },
    NoticeComputed,
    FastFilterChecked,
    CommitVetoChecked,
    Committed,
    Rejected(Rejection),
}

impl EditState {
    pub fn name(&self) -> &'static str {
        match self {
            EditState::FormRendered { .. } => "form_rendered",
            EditState::NoticeComputed => "notice_computed",
            EditState::FastFilterChecked => "fast_filter_checked",
            EditState::CommitVetoChecked => "commit_veto_checked",
            EditState::Committed => "committed",
            EditState::Rejected(_) => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, EditState::Committed | EditState::Rejected(_))
    }
}

/// Drives one edit through the coordinator's checks in order.
pub struct EditLifecycle<'a> {
    coordinator: &'a DecisionCoordinator,
    state: EditState,
    candidate: Option<EditCandidate>,
}

impl<'a> EditLifecycle<'a> {
    /// Start a lifecycle by showing the edit form, optionally prefilled.
    pub fn render_form(
        coordinator: &'a DecisionCoordinator,
        ctx: &mut RequestContext,
        draft: Option<&str>,
    ) -> Self {
        if let Some(text) = draft {
            coordinator.capture_draft(ctx, text);
        }
        Self {
            coordinator,
            state: EditState::FormRendered {
                draft_captured: ctx.draft().is_some(),
            },
            candidate: None,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn candidate(&self) -> Option<&EditCandidate> {
        self.candidate.as_ref()
    }

    pub fn compute_notices(
        &mut self,
        ctx: &mut RequestContext,
        page: &PageId,
        principal: &Principal,
    ) -> Result<Vec<Message>, GateError> {
        self.require(
            matches!(self.state, EditState::FormRendered { .. }),
            EditState::NoticeComputed,
        )?;
        let notices = self.coordinator.edit_notices(ctx, page, principal)?;
        self.advance(EditState::NoticeComputed);
        Ok(notices)
    }

    /// Submit the merged content. It is kept for the commit veto.
    pub fn submit<S: MessageSink + ?Sized>(
        &mut self,
        candidate: EditCandidate,
        status: &mut S,
    ) -> Result<FilterOutcome, GateError> {
        self.require(
            self.state == EditState::NoticeComputed,
            EditState::FastFilterChecked,
        )?;
        let outcome = self.coordinator.filter_merged_content(&candidate, status)?;
        self.candidate = Some(candidate);
        self.advance(match outcome {
            FilterOutcome::Allowed => EditState::FastFilterChecked,
            FilterOutcome::Rejected => EditState::Rejected(Rejection::FastFilter),
        });
        Ok(outcome)
    }

    pub fn check_commit<S: MessageSink + ?Sized>(
        &mut self,
        status: &mut S,
    ) -> Result<VetoOutcome, GateError> {
        self.require(
            self.state == EditState::FastFilterChecked,
            EditState::CommitVetoChecked,
        )?;
        let Some(candidate) = self.candidate.as_ref() else {
            return Err(self.invalid(EditState::CommitVetoChecked));
        };
        let outcome = self.coordinator.commit_veto(candidate, status)?;
        self.advance(match outcome {
            VetoOutcome::Allowed => EditState::CommitVetoChecked,
            VetoOutcome::Vetoed(reason) => EditState::Rejected(Rejection::Veto(reason)),
        });
        Ok(outcome)
    }

    /// Mark the revision saved and hand back the committed candidate.
    pub fn commit(&mut self) -> Result<EditCandidate, GateError> {
        self.require(
            self.state == EditState::CommitVetoChecked,
            EditState::Committed,
        )?;
        let Some(candidate) = self.candidate.take() else {
            return Err(self.invalid(EditState::Committed));
        };
        self.advance(EditState::Committed);
        Ok(candidate)
    }

    fn require(&self, allowed: bool, to: EditState) -> Result<(), GateError> {
        if allowed {
            Ok(())
        } else {
            Err(self.invalid(to))
        }
    }

    fn invalid(&self, to: EditState) -> GateError {
        GateError::InvalidTransition {
            from: self.state.name(),
            to: to.name(),
        }
    }

    fn advance(&mut self, to: EditState) {
        debug!(from = self.state.name(), to = to.name(), "edit lifecycle transition");
        self.state = to;
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
