// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::config::ExpansionConfig;
use crate::error::StoreError;
use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

struct Wiki {
    dir: TempDir,
}

impl Wiki {
    fn new() -> Self {
        let wiki = Self {
            dir: TempDir::new().unwrap(),
        };
        std::fs::create_dir(wiki.pages()).unwrap();
        wiki.page("Raw.wiki", "<html><b>stored</b></html>");
        wiki.page("Template__Evil.wiki", "{{#tag:html|x}}");
        wiki
    }

    fn pages(&self) -> PathBuf {
        self.dir.path().join("pages")
    }

    fn page(&self, file: &str, text: &str) {
        std::fs::write(self.pages().join(file), text).unwrap();
    }

    fn submission(&self, text: &str) -> PathBuf {
        let path = self.dir.path().join("submission.wiki");
        std::fs::write(&path, text).unwrap();
        path
    }

    fn args(&self, text: &str, user: Option<&str>, groups: &[&str]) -> CheckArgs {
        CheckArgs {
            pages: self.pages(),
            page: "Sandbox".to_string(),
            user: user.map(str::to_string),
            groups: groups.iter().map(|g| g.to_string()).collect(),
            grants: Vec::new(),
            audit: None,
            format: OutputFormat::Text,
            file: self.submission(text),
        }
    }
}

fn run_check(config: &GateConfig, args: &CheckArgs) -> (i32, String) {
    let mut out = Vec::new();
    let code = check(config, args, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

// scan

#[test]
fn scan_reports_each_file() {
    let dir = TempDir::new().unwrap();
    let clean = write(dir.path(), "clean.wiki", "plain");
    let raw = write(dir.path(), "raw.wiki", "{{ #tag: html | x }}");

    let mut out = Vec::new();
    let code = scan(
        &ScanArgs {
            files: vec![clean.clone(), raw.clone()],
        },
        &mut out,
    )
    .unwrap();

    assert_eq!(code, EXIT_DENIED);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}: clean\n{}: restricted\n", clean.display(), raw.display())
    );
}

#[test]
fn scan_clean_files_exit_zero() {
    let dir = TempDir::new().unwrap();
    let clean = write(dir.path(), "clean.wiki", "<HTML>not matched here</HTML>");
    let code = scan(&ScanArgs { files: vec![clean] }, &mut Vec::new()).unwrap();
    assert_eq!(code, EXIT_OK);
}

#[test]
fn scan_unreadable_file_exit_one() {
    let dir = TempDir::new().unwrap();
    let clean = write(dir.path(), "clean.wiki", "plain");
    let missing = dir.path().join("missing.wiki");

    let mut out = Vec::new();
    let code = scan(
        &ScanArgs {
            files: vec![missing, clean],
        },
        &mut out,
    )
    .unwrap();

    assert_eq!(code, EXIT_FAILURE);
    assert!(String::from_utf8(out).unwrap().ends_with("clean.wiki: clean\n"));
}

// check

#[test]
#[serial]
fn check_allows_clean_submission() {
    let wiki = Wiki::new();
    let (code, out) = run_check(&GateConfig::default(), &wiki.args("hello", None, &[]));
    assert_eq!(code, EXIT_OK);
    assert_eq!(out, "allowed\n");
}

#[test]
#[serial]
fn check_rejects_literal_tag() {
    let wiki = Wiki::new();
    let (code, out) = run_check(
        &GateConfig::default(),
        &wiki.args("<html>x</html>", Some("Bob"), &["user"]),
    );
    assert_eq!(code, EXIT_DENIED);
    assert_eq!(out, "rejected: saferhtmltag-denied-edit\n");
}

#[test]
#[serial]
fn check_vetoes_hidden_tag() {
    let wiki = Wiki::new();
    let (code, out) = run_check(
        &GateConfig::default(),
        &wiki.args("{{#if:1|ok|<HTML>x</HTML>}}", Some("Bob"), &[]),
    );
    assert_eq!(code, EXIT_DENIED);
    assert_eq!(out, "vetoed: saferhtmltag-denied-save\n");
}

#[test]
#[serial]
fn check_allows_transcluded_tag() {
    let wiki = Wiki::new();
    let (code, out) = run_check(&GateConfig::default(), &wiki.args("{{Evil}}", None, &[]));
    assert_eq!(code, EXIT_OK);
    assert_eq!(out, "allowed\n");
}

#[test]
#[serial]
fn check_allows_editor_group() {
    let wiki = Wiki::new();
    let (code, _) = run_check(
        &GateConfig::default(),
        &wiki.args("<html>x</html>", Some("Alice"), &["sysop"]),
    );
    assert_eq!(code, EXIT_OK);
}

#[test]
#[serial]
fn check_ignores_groups_of_anonymous() {
    let wiki = Wiki::new();
    let (code, _) = run_check(
        &GateConfig::default(),
        &wiki.args("<html>x</html>", None, &["sysop"]),
    );
    assert_eq!(code, EXIT_DENIED);
}

#[test]
#[serial]
fn check_allows_everything_when_disabled() {
    let wiki = Wiki::new();
    let config = GateConfig {
        raw_html_enabled: false,
        ..GateConfig::default()
    };
    let (code, out) = run_check(&config, &wiki.args("<html>x</html>", None, &[]));
    assert_eq!(code, EXIT_OK);
    assert_eq!(out, "allowed\n");
}

#[test]
#[serial]
fn check_fails_closed_on_budget() {
    let wiki = Wiki::new();
    let config = GateConfig {
        expansion: ExpansionConfig {
            max_expansions: 3,
            ..ExpansionConfig::default()
        },
        ..GateConfig::default()
    };
    let (code, out) = run_check(&config, &wiki.args(&"{{#if:1|a}}".repeat(5), None, &[]));
    assert_eq!(code, EXIT_DENIED);
    assert_eq!(out, "vetoed: saferhtmltag-expansion-too-complex\n");
}

#[test]
#[serial]
fn check_json_report() {
    let wiki = Wiki::new();
    let mut args = wiki.args("<html>x</html>", Some("Bob"), &[]);
    args.page = "Raw".to_string();
    args.format = OutputFormat::Json;

    let (code, out) = run_check(&GateConfig::default(), &args);
    assert_eq!(code, EXIT_DENIED);

    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["page"], "Raw");
    assert_eq!(report["principal"], "Bob");
    assert_eq!(report["outcome"], "rejected");
    assert_eq!(report["message_key"], keys::DENIED_EDIT);
    assert_eq!(report["notices"][0]["key"], keys::HTML_DETECTED_IN_EDIT_PAGE);
    assert_eq!(report["messages"][0]["severity"], "error");
}

#[test]
#[serial]
fn check_writes_audit_log() {
    let wiki = Wiki::new();
    let audit = wiki.dir.path().join("audit.jsonl");
    let mut args = wiki.args("<html>x</html>", None, &[]);
    args.audit = Some(audit.clone());

    run_check(&GateConfig::default(), &args);

    let lines = std::fs::read_to_string(&audit).unwrap();
    assert_eq!(lines.lines().count(), 1);
    assert!(lines.contains(keys::DENIED_EDIT));
}

#[test]
#[serial]
fn check_missing_submission_is_read_error() {
    let wiki = Wiki::new();
    let mut args = wiki.args("", None, &[]);
    args.file = wiki.dir.path().join("nope.wiki");

    let err = check(&GateConfig::default(), &args, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, RunError::Read { .. }));
}

#[test]
#[serial]
fn check_missing_page_directory_is_store_error() {
    let wiki = Wiki::new();
    let mut args = wiki.args("hello", None, &[]);
    args.pages = wiki.dir.path().join("absent");

    let err = check(&GateConfig::default(), &args, &mut Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        RunError::Gate(GateError::Store(StoreError::Unavailable { .. }))
    ));
}

#[test]
fn verdict_display() {
    assert_eq!(Verdict::Allowed.to_string(), "allowed");
    assert_eq!(
        Verdict::Vetoed(keys::DENIED_SAVE).to_string(),
        "vetoed: saferhtmltag-denied-save"
    );
}
