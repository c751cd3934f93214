// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::messages::keys;

fn render(message: &Message, is_terminal: bool) -> String {
    let mut buf = Vec::new();
    write_message(&mut buf, message, is_terminal);
    String::from_utf8(buf).unwrap()
}

#[test]
fn diagnostic_plain_text_when_not_terminal() {
    let mut buf = Vec::new();
    write_diagnostic(&mut buf, "Error", RED, "page directory missing", false);
    assert_eq!(String::from_utf8(buf).unwrap(), "Error: page directory missing\n");
}

#[test]
fn diagnostic_with_ansi_when_terminal() {
    let mut buf = Vec::new();
    write_diagnostic(&mut buf, "Warning", YELLOW, "unused option", true);
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "\x1b[33mWarning: unused option\x1b[0m\n"
    );
}

#[test]
fn message_label_follows_severity() {
    assert_eq!(
        render(&Message::warning(keys::HTML_DETECTED_IN_EDIT_PAGE), false),
        "Warning: saferhtmltag-html-detected-in-edit-page\n"
    );
    assert_eq!(
        render(&Message::error(keys::DENIED_EDIT), false),
        "Error: saferhtmltag-denied-edit\n"
    );
    assert_eq!(
        render(&Message::fatal(keys::DENIED_SAVE), true),
        "\x1b[31mFatal: saferhtmltag-denied-save\x1b[0m\n"
    );
}
