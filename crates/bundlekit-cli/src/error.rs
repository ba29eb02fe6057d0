//! Rendering per-directory errors with miette.

use bundlekit_bundler::Error;
use miette::{GraphicalReportHandler, GraphicalTheme};

/// Render `error` as a miette report, including its code and help text.
///
/// Falls back to the plain message if rendering fails.
pub fn render_error(error: &Error, color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);

    let mut out = String::new();
    match handler.render_report(&mut out, error) {
        Ok(()) => out,
        Err(_) => error.to_string(),
    }
}
