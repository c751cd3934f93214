// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::config::GateConfig;
use crate::coordinator::VetoReason;
use crate::expansion::WikitextEngineFactory;
use crate::messages::{keys, EditStatus};
use crate::page::PageContent;
use crate::stores::{MemoryPageStore, StaticPrincipalStore};
use std::sync::Arc;

fn gate() -> HtmlGate {
    let pages = Arc::new(
        MemoryPageStore::new()
            .with_page("Raw", "<html>x</html>")
            .with_page("Template:Wrap", "<div>{{{1}}}</div>"),
    );
    let principals = Arc::new(
        StaticPrincipalStore::new()
            .with_user("Admin", &["sysop"], &[])
            .with_user("Bob", &["user"], &["edit"]),
    );
    let engines = Arc::new(WikitextEngineFactory::new(pages.clone()));
    HtmlGate::new(DecisionCoordinator::new(
        GateConfig::default(),
        pages,
        principals,
        engines,
    ))
}

fn candidate(text: &str, user: &str) -> EditCandidate {
    EditCandidate::new(
        PageContent::wikitext(text),
        PageId::new("Sandbox"),
        Principal::new(user),
    )
}

#[test]
fn test_attached_to_every_hook_point() {
    assert_eq!(gate().hook_points(), &HookPoint::ALL);
}

#[test]
fn test_notices_are_appended() {
    let gate = gate();
    let mut ctx = RequestContext::interactive();
    gate.on_form_render_begin(&mut ctx, "<html>draft</html>");

    let mut notices = vec![Message::warning("someother-notice")];
    gate.on_edit_notices_collected(
        &mut ctx,
        &PageId::new("Sandbox"),
        &Principal::new("Bob"),
        &mut notices,
    )
    .unwrap();

    assert_eq!(
        notices,
        vec![
            Message::warning("someother-notice"),
            Message::warning(keys::HTML_DETECTED_IN_EDIT_PAGE),
        ]
    );
}

#[test]
fn test_filter_then_veto() {
    let gate = gate();
    let hidden = candidate("{{Wrap|<html>x</html>}}", "Bob");

    let mut status = EditStatus::new();
    let filtered = gate.on_content_merged_filter(&hidden, &mut status).unwrap();
    assert_eq!(filtered, FilterOutcome::Rejected);

    let mut status = EditStatus::new();
    let vetoed = gate.on_pre_commit(&hidden, &mut status).unwrap();
    assert_eq!(vetoed, VetoOutcome::Vetoed(VetoReason::RestrictedTagReachable));
    assert!(status.is_fatal());
}

#[test]
fn test_veto_catches_what_filter_misses() {
    let gate = gate();
    let sneaky = candidate("<HTML>x</HTML>", "Bob");

    let mut status = EditStatus::new();
    let filtered = gate.on_content_merged_filter(&sneaky, &mut status).unwrap();
    assert_eq!(filtered, FilterOutcome::Allowed);

    let vetoed = gate.on_pre_commit(&sneaky, &mut status).unwrap();
    assert!(!vetoed.is_allowed());
}

#[test]
fn test_permission_check() {
    let gate = gate();
    let ctx = RequestContext::interactive();
    let mut burst = PermissionBurst::new();

    let bob = gate
        .on_pre_permission_check(
            &ctx,
            &mut burst,
            &PageId::new("Raw"),
            &Principal::new("Bob"),
            Action::Edit,
        )
        .unwrap();
    let admin = gate
        .on_pre_permission_check(
            &ctx,
            &mut burst,
            &PageId::new("Raw"),
            &Principal::new("Admin"),
            Action::Edit,
        )
        .unwrap();

    assert!(!bob.is_allowed());
    assert!(admin.is_allowed());
    assert_eq!(burst.len(), 2);
}
