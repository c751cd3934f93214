// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn test_draft_is_overwritten_by_each_render() {
    let mut ctx = RequestContext::interactive();
    ctx.capture_draft("first");
    ctx.capture_draft("second");
    assert_eq!(ctx.draft(), Some("second"));
}

#[test]
fn test_take_draft_reads_once() {
    let mut ctx = RequestContext::interactive();
    ctx.capture_draft("<html>x</html>");

    assert_eq!(ctx.take_draft().as_deref(), Some("<html>x</html>"));
    assert_eq!(ctx.take_draft(), None);
}

#[test]
fn test_contexts_do_not_share_drafts() {
    let mut first = RequestContext::interactive();
    let second = RequestContext::interactive();
    first.capture_draft("draft");

    assert_eq!(second.draft(), None);
    assert_ne!(first.id(), second.id());
}

#[test]
fn test_execution_context() {
    assert!(RequestContext::batch().is_batch());
    assert!(!RequestContext::default().is_batch());
    assert_eq!(
        RequestContext::default().execution(),
        ExecutionContext::Interactive
    );
}

#[test]
fn test_burst_memoizes_per_principal_and_page() {
    let mut burst = PermissionBurst::new();
    let alice = Principal::new("Alice");
    let bob = Principal::new("Bob");
    let page = PageId::new("Main Page");

    let mut calls = 0;
    for _ in 0..3 {
        let may_edit = burst
            .get_or_try_insert_with(&alice, &page, || {
                calls += 1;
                Ok::<_, ()>(false)
            })
            .unwrap();
        assert!(!may_edit);
    }

    assert_eq!(calls, 1);
    assert_eq!(burst.get(&bob, &page), None);
    assert_eq!(burst.len(), 1);
}

#[test]
fn test_burst_does_not_cache_errors() {
    let mut burst = PermissionBurst::new();
    let alice = Principal::new("Alice");
    let page = PageId::new("Main Page");

    let err = burst.get_or_try_insert_with(&alice, &page, || Err("store down"));
    assert_eq!(err, Err("store down"));
    assert!(burst.is_empty());
}
