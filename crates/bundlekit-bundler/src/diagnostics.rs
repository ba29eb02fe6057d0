//! Log entries from Rolldown errors.
//!
//! Rolldown's diagnostic types change between releases, so errors are read
//! through their `Debug` output and classified by keyword. Everything the
//! engine reports flows through here, including plugin errors raised by the
//! YAML loader and the style token rewriter.

use std::fmt;

use crate::engine::{LogEntry, LogLevel};

/// Coarse diagnostic category, used as the log message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnresolvedEntry,
    UnresolvedImport,
    ParseError,
    Plugin,
    Other,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiagnosticKind::UnresolvedEntry => "unresolved entry",
            DiagnosticKind::UnresolvedImport => "unresolved import",
            DiagnosticKind::ParseError => "parse error",
            DiagnosticKind::Plugin => "plugin error",
            DiagnosticKind::Other => "build error",
        };
        f.write_str(label)
    }
}

/// Convert a Rolldown error (single or batched) into log entries.
pub fn log_entries_from_rolldown(error: &dyn fmt::Debug) -> Vec<LogEntry> {
    let error_str = format!("{error:?}");

    let entries: Vec<LogEntry> = error_str
        .split("BatchedBuildDiagnostic")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(entry_from_string)
        .collect();

    if entries.is_empty() {
        vec![entry_from_string(&error_str)]
    } else {
        entries
    }
}

/// Severity marker in a diagnostic's `Debug` output.
const WARNING_SEVERITY: &str = "severity: Warning";

fn entry_from_string(text: &str) -> LogEntry {
    let kind = classify(text);
    // Only the severity field decides; message text may mention anything.
    let level = if text.contains(WARNING_SEVERITY) {
        LogLevel::Warning
    } else {
        LogLevel::Error
    };

    let mut message = format!("{kind}: {}", text.trim());
    for cause in error_chain(text) {
        message.push_str("\n  caused by: ");
        message.push_str(&cause);
    }

    LogEntry { level, message }
}

fn classify(text: &str) -> DiagnosticKind {
    if text.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if text.contains("UnresolvedImport") || text.contains("Cannot resolve") {
        DiagnosticKind::UnresolvedImport
    } else if text.contains("Plugin") || text.contains("plugin") {
        DiagnosticKind::Plugin
    } else if text.contains("Parse error") || text.contains("Syntax") || text.contains("Expected")
    {
        DiagnosticKind::ParseError
    } else {
        DiagnosticKind::Other
    }
}

/// `Caused by:` lines as rendered by anyhow errors raised in plugin hooks.
fn error_chain(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let pos = trimmed.find("Caused by:")?;
            let cause = trimmed[pos + "Caused by:".len()..].trim();
            (!cause.is_empty()).then(|| cause.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FakeError(&'static str);

    #[test]
    fn single_error_becomes_one_entry() {
        let entries = log_entries_from_rolldown(&FakeError("UnresolvedEntry: ./missing.js"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Error);
        assert!(entries[0].message.starts_with("unresolved entry:"));
        assert!(entries[0].message.contains("missing.js"));
    }

    #[test]
    fn plugin_errors_are_classified() {
        let entries = log_entries_from_rolldown(&FakeError(
            "Plugin bundlekit-yaml failed: Invalid YAML in /p/data.yaml",
        ));
        assert!(entries[0].message.starts_with("plugin error:"));
        assert!(entries[0].message.contains("/p/data.yaml"));
    }

    #[test]
    fn warnings_keep_warning_level() {
        let entries = log_entries_from_rolldown(&FakeError(
            "BuildDiagnostic { inner: UnusedImport, severity: Warning }",
        ));
        assert_eq!(entries[0].level, LogLevel::Warning);
    }

    #[test]
    fn warning_in_message_text_stays_an_error() {
        let entries = log_entries_from_rolldown(&FakeError(
            "BuildDiagnostic { inner: Plugin failed: Invalid YAML in /p/warnings.yaml: \
             unknown warning key, severity: Error }",
        ));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Error);
        assert!(entries[0].message.contains("warnings.yaml"));
    }

    #[test]
    fn caused_by_lines_are_appended() {
        let chain = error_chain("top\nCaused by: inner failure\n");
        assert_eq!(chain, vec!["inner failure".to_string()]);
    }
}
