// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use yare::parameterized;

#[parameterized(
    plain = { "Main Page", "Main_Page" },
    lowercase_first = { "sandbox", "Sandbox" },
    trimmed = { "  Help:contents ", "Help:Contents" },
    namespace_space = { "Template: nav box", "Template:Nav_box" },
    leading_colon = { ":Main Page", "Main_Page" },
)]
fn test_page_id_normalization(input: &str, expected: &str) {
    assert_eq!(PageId::new(input).as_str(), expected);
}

#[parameterized(
    bare = { "Infobox", "Template:Infobox" },
    spaced = { " nav box ", "Template:Nav_box" },
    main_namespace = { ":Main Page", "Main_Page" },
    explicit_namespace = { "User:Alice/box", "User:Alice/box" },
)]
fn test_transclusion_target(name: &str, expected: &str) {
    assert_eq!(PageId::transclusion_target(name).as_str(), expected);
}

#[test]
fn test_namespace() {
    assert_eq!(PageId::new("Template:X").namespace(), Some("Template"));
    assert_eq!(PageId::new("Main Page").namespace(), None);
}

#[test]
fn test_content_model() {
    let wiki = PageContent::wikitext("<html>x</html>");
    assert!(wiki.is_wikitext());
    assert_eq!(wiki.as_wikitext(), Some("<html>x</html>"));

    let css = PageContent::other("css", "body { color: red }");
    assert!(!css.is_wikitext());
    assert_eq!(css.as_wikitext(), None);
}

#[test]
fn test_page_id_serializes_as_string() {
    let json = serde_json::to_string(&PageId::new("Main Page")).unwrap();
    assert_eq!(json, "\"Main_Page\"");
}
