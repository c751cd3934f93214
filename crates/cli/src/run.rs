// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command execution for the `htmlgate` binary.
//!
//! Exit codes: 0 when clean or allowed, 2 when restricted markup was found or
//! the edit was denied, 1 on any other failure.

use crate::cli::{CheckArgs, Cli, Command, OutputFormat, ScanArgs};
use crate::config::{ConfigError, GateConfig};
use crate::context::RequestContext;
use crate::coordinator::{DecisionCoordinator, FilterOutcome, VetoOutcome};
use crate::detect::has_restricted_markup;
use crate::env;
use crate::error::GateError;
use crate::expansion::WikitextEngineFactory;
use crate::lifecycle::EditLifecycle;
use crate::messages::{keys, EditStatus, Message};
use crate::output::{print_error, print_message, print_warning};
use crate::page::{EditCandidate, PageContent, PageId, PageStore, Principal};
use crate::stores::{DirPageStore, PrincipalRecord, StaticPrincipalStore};
use htmlgate_capture::DecisionLog;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_DENIED: i32 = 2;

/// Name the CLI edits under when no user is given.
pub const ANONYMOUS_PRINCIPAL: &str = "127.0.0.1";

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open audit log {}: {source}", path.display())]
    AuditLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Run the parsed command, writing results to `out`. Returns the exit code.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<i32, RunError> {
    match &cli.command {
        Command::Scan(args) => scan(args, out),
        Command::Check(args) => {
            let config_path = cli.config.clone().or_else(env::config_path);
            let config = GateConfig::load_or_default(config_path.as_deref())?;
            check(&config, args, out)
        }
    }
}

/// Syntactic scan of each file. Unreadable files are reported and skipped.
pub fn scan<W: Write>(args: &ScanArgs, out: &mut W) -> Result<i32, RunError> {
    let mut restricted = false;
    let mut failed = false;

    for path in &args.files {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let found = has_restricted_markup(Some(&text));
                restricted |= found;
                let label = if found { "restricted" } else { "clean" };
                writeln!(out, "{}: {}", path.display(), label)?;
            }
            Err(e) => {
                print_error(format_args!("{}: {}", path.display(), e));
                failed = true;
            }
        }
    }

    Ok(if restricted {
        EXIT_DENIED
    } else if failed {
        EXIT_FAILURE
    } else {
        EXIT_OK
    })
}

/// How a submission ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Rejected(&'static str),
    Vetoed(&'static str),
}

impl Verdict {
    pub fn outcome(&self) -> &'static str {
        match self {
            Verdict::Allowed => "allowed",
            Verdict::Rejected(_) => "rejected",
            Verdict::Vetoed(_) => "vetoed",
        }
    }

    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            Verdict::Allowed => None,
            Verdict::Rejected(key) | Verdict::Vetoed(key) => Some(*key),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Allowed => EXIT_OK,
            _ => EXIT_DENIED,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message_key() {
            Some(key) => write!(f, "{}: {}", self.outcome(), key),
            None => f.write_str(self.outcome()),
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    page: &'a PageId,
    principal: &'a Principal,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_key: Option<&'static str>,
    notices: &'a [Message],
    messages: &'a [Message],
}

/// Run one submission through notices, the fast filter and the commit veto.
pub fn check<W: Write>(
    config: &GateConfig,
    args: &CheckArgs,
    out: &mut W,
) -> Result<i32, RunError> {
    let text = std::fs::read_to_string(&args.file).map_err(|source| RunError::Read {
        path: args.file.clone(),
        source,
    })?;

    let pages = Arc::new(DirPageStore::new(&args.pages));
    let (principal, principals) = principal_table(args);
    let engines = Arc::new(WikitextEngineFactory::new(pages.clone()));
    let mut coordinator =
        DecisionCoordinator::new(config.clone(), pages.clone(), Arc::new(principals), engines);
    if let Some(path) = args.audit.clone().or_else(env::audit_log_path) {
        let log = DecisionLog::with_file(&path)
            .map_err(|source| RunError::AuditLog { path, source })?;
        coordinator = coordinator.with_audit(log);
    }

    let page = PageId::new(&args.page);
    // The submission keeps the content model of the stored page.
    let model = pages
        .read_stored_content(&page)
        .map_err(GateError::from)?
        .map(|stored| stored.model)
        .unwrap_or_default();
    let candidate =
        EditCandidate::new(PageContent { model, text }, page.clone(), principal.clone());

    let mut ctx = RequestContext::batch();
    let mut edit = EditLifecycle::render_form(&coordinator, &mut ctx, None);
    let notices = edit.compute_notices(&mut ctx, &page, &principal)?;
    let mut status = EditStatus::new();

    let verdict = match edit.submit(candidate, &mut status)? {
        FilterOutcome::Rejected => Verdict::Rejected(keys::DENIED_EDIT),
        FilterOutcome::Allowed => match edit.check_commit(&mut status)? {
            VetoOutcome::Vetoed(reason) => Verdict::Vetoed(reason.message_key()),
            VetoOutcome::Allowed => {
                edit.commit()?;
                Verdict::Allowed
            }
        },
    };
    info!(page = %page, principal = %principal, verdict = %verdict, "checked submission");

    match args.format {
        OutputFormat::Text => {
            for notice in &notices {
                print_message(notice);
            }
            writeln!(out, "{verdict}")?;
        }
        OutputFormat::Json => {
            let report = CheckReport {
                page: &page,
                principal: &principal,
                outcome: verdict.outcome(),
                message_key: verdict.message_key(),
                notices: &notices,
                messages: status.messages(),
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        }
    }

    Ok(verdict.exit_code())
}

fn principal_table(args: &CheckArgs) -> (Principal, StaticPrincipalStore) {
    let mut store = StaticPrincipalStore::new();
    let Some(name) = &args.user else {
        if !args.groups.is_empty() || !args.grants.is_empty() {
            print_warning("--group and --grant are ignored without --user");
        }
        return (Principal::new(ANONYMOUS_PRINCIPAL), store);
    };

    store.insert(
        name.clone(),
        PrincipalRecord {
            anonymous: false,
            groups: args.groups.clone(),
            permissions: args.grants.clone(),
        },
    );
    (Principal::new(name.clone()), store)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
