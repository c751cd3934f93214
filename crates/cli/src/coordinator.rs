// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Decision coordinator.
//!
//! Combines the syntactic detector, the permission oracle and the expansion
//! detector into the four decisions the host asks for:
//!
//! | Decision | Check | Denial |
//! |---|---|---|
//! | edit notices | syntactic | warning notice |
//! | pre-commit filter | syntactic | non-fatal error |
//! | commit veto | semantic | fatal error |
//! | permission gate | syntactic on stored content | edit refused |
//!
//! Policy denials are reported through the status objects, never as `Err`.

use crate::config::GateConfig;
use crate::context::{PermissionBurst, RequestContext};
use crate::detect::has_restricted_markup;
use crate::error::GateError;
use crate::expansion::{ExpansionEngineFactory, ExpansionError, ExpansionHookDetector};
use crate::messages::{keys, Message, MessageSink};
use crate::page::{EditCandidate, PageId, PageStore, Principal};
use crate::permission::{PermissionOracle, PrincipalStore};
use htmlgate_capture::{DecisionLog, DecisionOutcome, DecisionPoint, DecisionRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Action a permission check is issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Edit,
    Create,
    Move,
    Delete,
    Protect,
}

/// Result of the pre-commit filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOutcome {
    Allowed,
    /// The user stays on the edit form with an explanation
    Rejected,
}

impl FilterOutcome {
    pub fn is_allowed(&self) -> bool {
        *self == FilterOutcome::Allowed
    }
}

/// Why the commit veto refused a save.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VetoReason {
    /// The expansion reached the restricted tag on the edited page
    RestrictedTagReachable,
    /// The expansion ran out of budget before it could prove the content safe
    ExpansionTooComplex,
}

impl VetoReason {
    pub fn message_key(&self) -> &'static str {
        match self {
            VetoReason::RestrictedTagReachable => keys::DENIED_SAVE,
            VetoReason::ExpansionTooComplex => keys::EXPANSION_TOO_COMPLEX,
        }
    }
}

/// Result of the commit-time veto.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum VetoOutcome {
    Allowed,
    Vetoed(VetoReason),
}

impl VetoOutcome {
    pub fn is_allowed(&self) -> bool {
        *self == VetoOutcome::Allowed
    }
}

/// Answer of the edit permission gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PermissionGate {
    Allowed,
    Denied { message_key: &'static str },
}

impl PermissionGate {
    pub fn is_allowed(&self) -> bool {
        *self == PermissionGate::Allowed
    }
}

/// Runs the gate's decisions against the host's collaborators.
pub struct DecisionCoordinator {
    config: GateConfig,
    pages: Arc<dyn PageStore>,
    oracle: PermissionOracle,
    detector: ExpansionHookDetector,
    engines: Arc<dyn ExpansionEngineFactory>,
    audit: Option<DecisionLog>,
}

impl DecisionCoordinator {
    pub fn new(
        config: GateConfig,
        pages: Arc<dyn PageStore>,
        principals: Arc<dyn PrincipalStore>,
        engines: Arc<dyn ExpansionEngineFactory>,
    ) -> Self {
        let oracle = PermissionOracle::from_config(principals, &config);
        let detector = ExpansionHookDetector::from_config(&config);
        Self {
            config,
            pages,
            oracle,
            detector,
            engines,
            audit: None,
        }
    }

    /// Record every decision into `log`.
    pub fn with_audit(mut self, log: DecisionLog) -> Self {
        self.audit = Some(log);
        self
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn oracle(&self) -> &PermissionOracle {
        &self.oracle
    }

    pub fn audit(&self) -> Option<&DecisionLog> {
        self.audit.as_ref()
    }

    /// Whether raw HTML is enabled. When it is not, every decision allows.
    pub fn is_enabled(&self) -> bool {
        self.config.raw_html_enabled
    }

    /// Remember the edit form content for the notices of this request.
    pub fn capture_draft(&self, ctx: &mut RequestContext, text: &str) {
        if !self.is_enabled() {
            return;
        }
        debug!(request = %ctx.id(), len = text.len(), "captured edit form draft");
        ctx.capture_draft(text);
    }

    /// Notices to show above the edit form.
    ///
    /// Inspects the draft captured earlier in this request, or the stored
    /// content when there is no draft and the page exists.
    pub fn edit_notices(
        &self,
        ctx: &mut RequestContext,
        page: &PageId,
        principal: &Principal,
    ) -> Result<Vec<Message>, GateError> {
        let mut notices = Vec::new();
        if !self.is_enabled() {
            return Ok(notices);
        }

        let content = match ctx.take_draft() {
            Some(draft) => Some(draft),
            None if self.pages.page_exists(page)? => self
                .pages
                .read_stored_content(page)?
                .filter(|content| content.is_wikitext())
                .map(|content| content.text),
            None => None,
        };

        if !has_restricted_markup(content.as_deref()) {
            return Ok(notices);
        }
        if self.oracle.is_authorized(principal)? {
            debug!(%page, %principal, "restricted markup present, principal authorized");
            return Ok(notices);
        }

        info!(request = %ctx.id(), %page, %principal, "raw HTML edit notice");
        notices.emit_warning(keys::HTML_DETECTED_IN_EDIT_PAGE);
        self.record(
            DecisionPoint::EditNotice,
            page,
            principal,
            DecisionOutcome::Warned {
                message_key: keys::HTML_DETECTED_IN_EDIT_PAGE.to_string(),
            },
        );
        Ok(notices)
    }

    /// Fast syntactic check run on the merged content before saving.
    pub fn filter_merged_content<S: MessageSink + ?Sized>(
        &self,
        candidate: &EditCandidate,
        status: &mut S,
    ) -> Result<FilterOutcome, GateError> {
        let EditCandidate {
            content,
            page,
            principal,
        } = candidate;

        if !self.is_enabled() || !has_restricted_markup(content.as_wikitext()) {
            debug!(%page, "no restricted markup in submission");
            self.record(DecisionPoint::ContentFilter, page, principal, DecisionOutcome::Allowed);
            return Ok(FilterOutcome::Allowed);
        }
        if self.oracle.is_authorized(principal)? {
            debug!(%page, %principal, "restricted markup submitted by authorized principal");
            self.record(DecisionPoint::ContentFilter, page, principal, DecisionOutcome::Allowed);
            return Ok(FilterOutcome::Allowed);
        }

        info!(%page, %principal, "submission rejected: raw HTML without permission");
        status.emit_error(keys::DENIED_EDIT, false);
        self.record(
            DecisionPoint::ContentFilter,
            page,
            principal,
            DecisionOutcome::Denied {
                message_key: keys::DENIED_EDIT.to_string(),
                fatal: false,
            },
        );
        Ok(FilterOutcome::Rejected)
    }

    /// Authoritative check run right before the content is committed.
    ///
    /// Authorized principals skip the expansion entirely. For everyone else
    /// the content is expanded with every conditional branch taken; the
    /// syntactic verdict plays no part here.
    pub fn commit_veto<S: MessageSink + ?Sized>(
        &self,
        candidate: &EditCandidate,
        status: &mut S,
    ) -> Result<VetoOutcome, GateError> {
        let EditCandidate {
            content,
            page,
            principal,
        } = candidate;

        if !self.is_enabled() || self.oracle.is_authorized(principal)? {
            self.record(DecisionPoint::CommitVeto, page, principal, DecisionOutcome::Allowed);
            return Ok(VetoOutcome::Allowed);
        }

        let reason = match self
            .detector
            .expand_and_detect(content, page, self.engines.as_ref())
        {
            Ok(verdict) if verdict.has_restricted_tag => VetoReason::RestrictedTagReachable,
            Ok(_) => {
                debug!(%page, %principal, "expansion did not reach restricted tag");
                self.record(DecisionPoint::CommitVeto, page, principal, DecisionOutcome::Allowed);
                return Ok(VetoOutcome::Allowed);
            }
            Err(err @ ExpansionError::BudgetExceeded(_)) => {
                warn!(%page, %principal, error = %err, "expansion budget exhausted, refusing save");
                VetoReason::ExpansionTooComplex
            }
            Err(err) => return Err(err.into()),
        };

        info!(%page, %principal, ?reason, "save vetoed");
        status.emit_error(reason.message_key(), true);
        self.record(
            DecisionPoint::CommitVeto,
            page,
            principal,
            DecisionOutcome::Denied {
                message_key: reason.message_key().to_string(),
                fatal: true,
            },
        );
        Ok(VetoOutcome::Vetoed(reason))
    }

    /// Edit eligibility check issued while listing or opening pages.
    ///
    /// Only the edit action on existing wikitext pages is restricted, and
    /// never in batch execution. Answers are memoized in `burst`.
    pub fn user_can_edit(
        &self,
        ctx: &RequestContext,
        burst: &mut PermissionBurst,
        page: &PageId,
        principal: &Principal,
        action: Action,
    ) -> Result<PermissionGate, GateError> {
        if !self.is_enabled() || ctx.is_batch() || action != Action::Edit {
            return Ok(PermissionGate::Allowed);
        }
        if !self.pages.page_exists(page)? || !self.pages.is_wikitext_page(page)? {
            return Ok(PermissionGate::Allowed);
        }

        let may_edit = burst.get_or_try_insert_with(principal, page, || -> Result<bool, GateError> {
            if self.oracle.is_authorized(principal)? {
                return Ok(true);
            }
            let stored = self.pages.read_stored_content(page)?;
            Ok(!has_restricted_markup(stored.as_ref().map(|c| c.text.as_str())))
        })?;

        if may_edit {
            self.record(DecisionPoint::PermissionGate, page, principal, DecisionOutcome::Allowed);
            return Ok(PermissionGate::Allowed);
        }

        info!(%page, %principal, "edit refused: page holds raw HTML");
        self.record(
            DecisionPoint::PermissionGate,
            page,
            principal,
            DecisionOutcome::Denied {
                message_key: keys::DENIED_EDIT.to_string(),
                fatal: false,
            },
        );
        Ok(PermissionGate::Denied {
            message_key: keys::DENIED_EDIT,
        })
    }

    fn record(
        &self,
        point: DecisionPoint,
        page: &PageId,
        principal: &Principal,
        outcome: DecisionOutcome,
    ) {
        if let Some(log) = &self.audit {
            log.record(DecisionRecord::new(
                point,
                page.as_str(),
                principal.name(),
                outcome,
            ));
        }
    }
}

impl std::fmt::Debug for DecisionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionCoordinator")
            .field("config", &self.config)
            .field("detector", &self.detector)
            .field("audit", &self.audit.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
