// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line argument parsing.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Raw HTML edit gate for wiki pages
#[derive(Parser, Debug)]
#[command(name = "htmlgate", version, about = "Raw HTML edit gate for wiki pages")]
pub struct Cli {
    /// Gate configuration file (TOML). Defaults to `$HTMLGATE_CONFIG`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report which files contain restricted markup, without expansion
    Scan(ScanArgs),
    /// Run a file through the full edit checks as a submission to a page
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Files to scan
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Directory holding the stored pages (`<Title>.wiki`)
    #[arg(long, value_name = "DIR")]
    pub pages: PathBuf,

    /// Title of the page being edited
    #[arg(long, value_name = "TITLE")]
    pub page: String,

    /// Registered user making the edit. Anonymous when omitted.
    #[arg(long, value_name = "NAME")]
    pub user: Option<String>,

    /// Group membership of the user (repeatable)
    #[arg(long = "group", value_name = "GROUP")]
    pub groups: Vec<String>,

    /// Permission granted to the user (repeatable)
    #[arg(long = "grant", value_name = "PERMISSION")]
    pub grants: Vec<String>,

    /// Append every decision to this JSONL file. Defaults to `$HTMLGATE_AUDIT_LOG`.
    #[arg(long, value_name = "FILE")]
    pub audit: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Submitted page content
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
