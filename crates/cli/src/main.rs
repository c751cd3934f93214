// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! htmlgate binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use htmlgate::cli::Cli;
use htmlgate::env;
use htmlgate::output::print_error;
use htmlgate::run::{run, EXIT_FAILURE};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let code = match run(&cli, &mut std::io::stdout().lock()) {
        Ok(code) => code,
        Err(e) => {
            print_error(e);
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

/// Log to stderr. `HTMLGATE_LOG` wins over `RUST_LOG`; warnings only by default.
fn init_tracing() {
    let filter = match env::log_filter() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
