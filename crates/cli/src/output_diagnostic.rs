// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing diagnostics on stderr.
//!
//! Colored when stderr is a terminal, plain text otherwise. Progress goes
//! through `tracing`; these helpers are for failures the operator must see.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

/// Print an error message to stderr.
///
/// Displays in red when stderr is a terminal, plain text otherwise.
pub fn print_error(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr(), msg, is_tty);
}

fn write_error<W: Write>(writer: &mut W, msg: impl Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[31mError: {}\x1b[0m", msg);
    } else {
        let _ = writeln!(writer, "Error: {}", msg);
    }
}

/// Print a warning message to stderr.
///
/// Displays in yellow when stderr is a terminal, plain text otherwise.
pub fn print_warning(msg: impl Display) {
    let is_tty = io::stderr().is_terminal();
    write_warning(&mut io::stderr(), msg, is_tty);
}

fn write_warning<W: Write>(writer: &mut W, msg: impl Display, is_terminal: bool) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[33mWarning: {}\x1b[0m", msg);
    } else {
        let _ = writeln!(writer, "Warning: {}", msg);
    }
}

/// Report an episode that failed while the rest of the run continues.
pub fn print_episode_failure(number: usize, name: &str, error: &impl Display) {
    print_warning(episode_failure(number, name, error));
}

fn episode_failure(number: usize, name: &str, error: &impl Display) -> String {
    format!("Episode {number} ({name}) failed: {error}")
}

#[cfg(test)]
#[path = "output_diagnostic_tests.rs"]
mod tests;
