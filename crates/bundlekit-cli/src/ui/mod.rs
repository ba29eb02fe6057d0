//! Terminal output for the CLI.
//!
//! All status lines go to stderr, prefixed with a colored symbol.
//! [`TerminalReporter`] turns build progress into those lines.

mod reporter;

use owo_colors::OwoColorize;

pub use reporter::TerminalReporter;

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Info,
    Warning,
    Error,
}

impl Status {
    /// Print `message` to stderr.
    ///
    /// ```no_run
    /// use bundlekit_cli::ui::Status;
    ///
    /// Status::Success.print("@blockcode/ui is complete.");
    /// ```
    pub fn print(self, message: &str) {
        match self {
            Status::Success => eprintln!("{} {}", "✓".green().bold(), message),
            Status::Info => eprintln!("{} {}", "ℹ".blue().bold(), message),
            Status::Warning => eprintln!("{} {}", "⚠".yellow().bold(), message.yellow()),
            Status::Error => eprintln!("{} {}", "✗".red().bold(), message.red()),
        }
    }
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, then falls back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Apply the color decision to `console`'s stderr styling.
pub fn init_colors() {
    console::set_colors_enabled_stderr(should_use_color());
}
