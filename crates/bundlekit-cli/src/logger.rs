//! Logging setup for the bundlekit CLI.
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber. `RUST_LOG` overrides the default filter.
//!
//! ```rust,no_run
//! use bundlekit_cli::logger::init_logger;
//!
//! init_logger();
//! tracing::debug!("resolving packages");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ui;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "bundlekit=info";

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger() {
    let filter = default_filter();

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(ui::should_use_color())
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
