// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Entry points the host calls at each hook point.

use super::point::HookPoint;
use crate::context::{PermissionBurst, RequestContext};
use crate::coordinator::{Action, DecisionCoordinator, FilterOutcome, PermissionGate, VetoOutcome};
use crate::error::GateError;
use crate::messages::{Message, MessageSink};
use crate::page::{EditCandidate, PageId, Principal};
use tracing::debug_span;

/// The gate as seen by the host: one method per hook point.
#[derive(Debug)]
pub struct HtmlGate {
    coordinator: DecisionCoordinator,
}

impl HtmlGate {
    pub fn new(coordinator: DecisionCoordinator) -> Self {
        Self { coordinator }
    }

    pub fn coordinator(&self) -> &DecisionCoordinator {
        &self.coordinator
    }

    /// Hook points this gate must be attached to.
    pub fn hook_points(&self) -> &'static [HookPoint] {
        &HookPoint::ALL
    }

    /// `FormRenderBegin`: remember the textbox content of the edit form.
    pub fn on_form_render_begin(&self, ctx: &mut RequestContext, textbox: &str) {
        let _span = debug_span!(
            "hook",
            point = %HookPoint::FormRenderBegin,
            request = %ctx.id()
        )
        .entered();
        self.coordinator.capture_draft(ctx, textbox);
    }

    /// `EditNoticesCollected`: append the gate's notices to the host's list.
    pub fn on_edit_notices_collected(
        &self,
        ctx: &mut RequestContext,
        page: &PageId,
        principal: &Principal,
        notices: &mut Vec<Message>,
    ) -> Result<(), GateError> {
        let _span = debug_span!(
            "hook",
            point = %HookPoint::EditNoticesCollected,
            request = %ctx.id()
        )
        .entered();
        notices.extend(self.coordinator.edit_notices(ctx, page, principal)?);
        Ok(())
    }

    /// `ContentMergedFilter`: fast rejection of unauthorized raw HTML.
    pub fn on_content_merged_filter<S: MessageSink + ?Sized>(
        &self,
        candidate: &EditCandidate,
        status: &mut S,
    ) -> Result<FilterOutcome, GateError> {
        let _span = debug_span!("hook", point = %HookPoint::ContentMergedFilter).entered();
        self.coordinator.filter_merged_content(candidate, status)
    }

    /// `PrePermissionCheck`: edit eligibility for one title of a burst.
    pub fn on_pre_permission_check(
        &self,
        ctx: &RequestContext,
        burst: &mut PermissionBurst,
        page: &PageId,
        principal: &Principal,
        action: Action,
    ) -> Result<PermissionGate, GateError> {
        let _span = debug_span!(
            "hook",
            point = %HookPoint::PrePermissionCheck,
            request = %ctx.id()
        )
        .entered();
        self.coordinator.user_can_edit(ctx, burst, page, principal, action)
    }

    /// `PreCommit`: the authoritative veto.
    pub fn on_pre_commit<S: MessageSink + ?Sized>(
        &self,
        candidate: &EditCandidate,
        status: &mut S,
    ) -> Result<VetoOutcome, GateError> {
        let _span = debug_span!("hook", point = %HookPoint::PreCommit).entered();
        self.coordinator.commit_veto(candidate, status)
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
