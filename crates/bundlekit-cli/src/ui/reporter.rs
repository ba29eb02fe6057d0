//! Build progress on the terminal.

use std::path::Path;

use bundlekit_bundler::{BuildReporter, Error, LogEntry, LogLevel};
use console::Term;

use super::{Status, should_use_color};
use crate::error::render_error;

/// Prints "<name> is building..." and replaces it with the completion line
/// when stderr is a terminal.
#[derive(Debug)]
pub struct TerminalReporter {
    term: Term,
    color: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            color: should_use_color(),
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildReporter for TerminalReporter {
    fn started(&self, name: &str) {
        Status::Info.print(&format!("{name} is building..."));
    }

    fn completed(&self, name: &str) {
        if self.term.is_term() {
            if let Err(e) = self.term.clear_last_lines(1) {
                tracing::debug!("Could not clear progress line: {}", e);
            }
        }
        Status::Success.print(&format!("{name} is complete."));
    }

    fn failed(&self, name: &str, logs: &[LogEntry]) {
        Status::Error.print(&format!("{name} failed to build"));
        for entry in logs {
            match entry.level {
                LogLevel::Error => Status::Error.print(&entry.message),
                LogLevel::Warning => Status::Warning.print(&entry.message),
                LogLevel::Info => Status::Info.print(&entry.message),
            }
        }
    }

    fn errored(&self, dir: &Path, error: &Error) {
        Status::Error.print(&format!("{} could not be built", dir.display()));
        eprintln!("{}", render_error(error, self.color));
    }
}
