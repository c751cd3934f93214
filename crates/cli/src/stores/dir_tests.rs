// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn test_file_stem_escapes_namespace_and_subpages() {
    assert_eq!(
        DirPageStore::file_stem(&PageId::new("Template:Nav box")),
        "Template__Nav_box"
    );
    assert_eq!(
        DirPageStore::file_stem(&PageId::new("User:Alice/Sandbox")),
        "User__Alice%2FSandbox"
    );
}

#[test]
fn test_reads_wikitext_page() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Template__Box.wiki"), "{{{1}}}").unwrap();
    let store = DirPageStore::new(dir.path());

    let page = PageId::new("Template:Box");
    assert!(store.page_exists(&page).unwrap());
    assert!(store.is_wikitext_page(&page).unwrap());
    assert_eq!(
        store.read_stored_content(&page).unwrap(),
        Some(PageContent::wikitext("{{{1}}}"))
    );
}

#[test]
fn test_extension_selects_model() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("MediaWiki__Common.css"), "<html>").unwrap();
    let store = DirPageStore::new(dir.path());

    let page = PageId::new("MediaWiki:Common");
    assert!(store.page_exists(&page).unwrap());
    assert!(!store.is_wikitext_page(&page).unwrap());
    let content = store.read_stored_content(&page).unwrap().unwrap();
    assert_eq!(content.model, ContentModel::Other("css".to_string()));
}

#[test]
fn test_missing_page() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirPageStore::new(dir.path());

    let page = PageId::new("Nowhere");
    assert!(!store.page_exists(&page).unwrap());
    assert!(store.is_wikitext_page(&page).unwrap());
    assert_eq!(store.read_stored_content(&page).unwrap(), None);
}

#[test]
fn test_missing_root_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirPageStore::new(dir.path().join("gone"));

    let err = store.page_exists(&PageId::new("Anything")).unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { .. }));
}
