// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! A host driving the gate through whole edits.

use htmlgate::audit::{DecisionLog, DecisionOutcome, DecisionPoint};
use htmlgate::context::{PermissionBurst, RequestContext};
use htmlgate::coordinator::{Action, FilterOutcome, VetoOutcome, VetoReason};
use htmlgate::expansion::WikitextEngineFactory;
use htmlgate::lifecycle::{EditLifecycle, EditState, Rejection};
use htmlgate::messages::{keys, EditStatus, Message};
use htmlgate::page::{EditCandidate, PageContent, PageId, Principal};
use htmlgate::stores::{MemoryPageStore, StaticPrincipalStore};
use htmlgate::{DecisionCoordinator, GateConfig, HookPoint, HtmlGate};
use std::sync::Arc;

struct Host {
    gate: HtmlGate,
    pages: Arc<MemoryPageStore>,
    log: DecisionLog,
}

fn host() -> Host {
    let pages = Arc::new(
        MemoryPageStore::new()
            .with_page("Front", "<html><marquee>hi</marquee></html>")
            .with_page("About", "about us")
            .with_page("Template:Quote", "<blockquote>{{{1}}}</blockquote>"),
    );
    let principals = Arc::new(
        StaticPrincipalStore::new()
            .with_user("Ada", &["sysop"], &[])
            .with_user("Bob", &["user"], &["edit"]),
    );
    let engines = Arc::new(WikitextEngineFactory::new(pages.clone()));
    let log = DecisionLog::new();
    let coordinator =
        DecisionCoordinator::new(GateConfig::default(), pages.clone(), principals, engines)
            .with_audit(log.clone());
    Host {
        gate: HtmlGate::new(coordinator),
        pages,
        log,
    }
}

fn submission(text: &str, page: &str, user: &str) -> EditCandidate {
    EditCandidate::new(PageContent::wikitext(text), PageId::new(page), Principal::new(user))
}

#[test]
fn gate_attaches_to_every_hook() {
    let names: Vec<_> = host().gate.hook_points().iter().map(HookPoint::wire_name).collect();
    assert_eq!(
        names,
        [
            "EditPage::showEditForm:initial",
            "TitleGetEditNotices",
            "EditFilterMergedContent",
            "getUserPermissionsErrors",
            "MultiContentSave",
        ]
    );
}

#[test]
fn unauthorized_user_cannot_open_page_with_raw_html() {
    let host = host();
    let ctx = RequestContext::interactive();
    let mut burst = PermissionBurst::new();
    let bob = Principal::new("Bob");

    let front = host
        .gate
        .on_pre_permission_check(&ctx, &mut burst, &PageId::new("Front"), &bob, Action::Edit)
        .unwrap();
    let about = host
        .gate
        .on_pre_permission_check(&ctx, &mut burst, &PageId::new("About"), &bob, Action::Edit)
        .unwrap();
    let view = host
        .gate
        .on_pre_permission_check(&ctx, &mut burst, &PageId::new("Front"), &bob, Action::View)
        .unwrap();

    assert!(!front.is_allowed());
    assert!(about.is_allowed());
    assert!(view.is_allowed());
    assert_eq!(host.log.denials().len(), 1);
}

#[test]
fn batch_jobs_skip_the_permission_gate() {
    let host = host();
    let gate = host
        .gate
        .on_pre_permission_check(
            &RequestContext::batch(),
            &mut PermissionBurst::new(),
            &PageId::new("Front"),
            &Principal::new("Bob"),
            Action::Edit,
        )
        .unwrap();
    assert!(gate.is_allowed());
    assert_eq!(host.pages.read_count(), 0);
}

#[test]
fn sysop_edit_is_committed() {
    let host = host();
    let coordinator = host.gate.coordinator();
    let mut ctx = RequestContext::interactive();
    let ada = Principal::new("Ada");
    let front = PageId::new("Front");

    let mut edit = EditLifecycle::render_form(coordinator, &mut ctx, Some("<html>new</html>"));
    assert!(edit.compute_notices(&mut ctx, &front, &ada).unwrap().is_empty());

    let mut status = EditStatus::new();
    edit.submit(submission("<html>new</html>", "Front", "Ada"), &mut status).unwrap();
    edit.check_commit(&mut status).unwrap();
    edit.commit().unwrap();

    assert_eq!(edit.state(), EditState::Committed);
    assert!(host.log.denials().is_empty());
}

#[test]
fn hidden_markup_passes_filter_but_is_vetoed() {
    let host = host();
    let coordinator = host.gate.coordinator();
    let mut ctx = RequestContext::interactive();
    let text = "{{Quote|{{#if:{{{nope|}}}|fine|<HTML><script></script></HTML>}} }}";

    let mut edit = EditLifecycle::render_form(coordinator, &mut ctx, Some(text));
    let notices = edit
        .compute_notices(&mut ctx, &PageId::new("About"), &Principal::new("Bob"))
        .unwrap();
    assert!(notices.is_empty());

    let mut status = EditStatus::new();
    assert_eq!(
        edit.submit(submission(text, "About", "Bob"), &mut status).unwrap(),
        FilterOutcome::Allowed
    );
    assert_eq!(
        edit.check_commit(&mut status).unwrap(),
        VetoOutcome::Vetoed(VetoReason::RestrictedTagReachable)
    );
    assert_eq!(
        edit.state(),
        EditState::Rejected(Rejection::Veto(VetoReason::RestrictedTagReachable))
    );
    assert_eq!(status.messages(), &[Message::fatal(keys::DENIED_SAVE)]);

    let vetoes = host.log.find_by_point(DecisionPoint::CommitVeto);
    assert_eq!(vetoes.len(), 1);
    assert!(matches!(
        vetoes[0].record.outcome,
        DecisionOutcome::Denied { fatal: true, .. }
    ));
}

#[test]
fn removing_raw_html_from_page_is_allowed() {
    let host = host();
    let mut ctx = RequestContext::interactive();
    let bob = Principal::new("Bob");
    let front = PageId::new("Front");

    host.gate.on_form_render_begin(&mut ctx, "<marquee>hi</marquee>");
    let mut notices = Vec::new();
    host.gate
        .on_edit_notices_collected(&mut ctx, &front, &bob, &mut notices)
        .unwrap();
    assert!(notices.is_empty());

    let edit = submission("<marquee>hi</marquee>", "Front", "Bob");
    let mut status = EditStatus::new();
    assert!(host
        .gate
        .on_content_merged_filter(&edit, &mut status)
        .unwrap()
        .is_allowed());
    assert!(host.gate.on_pre_commit(&edit, &mut status).unwrap().is_allowed());
    assert!(status.is_ok());
}
