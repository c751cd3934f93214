// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output on stderr.
//!
//! Colored when stderr is a terminal, plain text otherwise.

use crate::messages::{Message, Severity};
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

pub fn print_error(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_diagnostic(&mut io::stderr(), "Error", RED, msg, is_tty);
}

pub fn print_warning(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_diagnostic(&mut io::stderr(), "Warning", YELLOW, msg, is_tty);
}

/// Print a gate message with a label matching its severity.
pub fn print_message(message: &Message) {
    let is_tty = io::stderr().is_terminal();
    write_message(&mut io::stderr(), message, is_tty);
}

fn write_message<W: Write>(writer: &mut W, message: &Message, is_terminal: bool) {
    let (label, color) = match message.severity {
        Severity::Warning => ("Warning", YELLOW),
        Severity::Error => ("Error", RED),
        Severity::Fatal => ("Fatal", RED),
    };
    write_diagnostic(writer, label, color, &message.key, is_terminal);
}

fn write_diagnostic<W: Write>(
    writer: &mut W,
    label: &str,
    color: &str,
    msg: impl Display,
    is_terminal: bool,
) {
    if is_terminal {
        let _ = writeln!(writer, "{color}{label}: {msg}{RESET}");
    } else {
        let _ = writeln!(writer, "{label}: {msg}");
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
