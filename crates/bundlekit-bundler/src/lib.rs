//! Option resolution and build orchestration for bundlekit.
//!
//! This crate turns a loaded package (descriptor + build config) into
//! [`ResolvedBuildOptions`], hands them to a [`BundleEngine`] and reports the
//! outcome. Directories are always processed one after another.
//!
//! # Quick Start
//!
//! ```no_run
//! use bundlekit_bundler::{Orchestrator, RolldownEngine, TracingReporter};
//! use bundlekit_config::BuildEnv;
//!
//! # async fn example() {
//! let orchestrator = Orchestrator::new(RolldownEngine::new(), BuildEnv::from_env());
//! let outcomes = orchestrator
//!     .build_all(["packages/app", "packages/ui"], &TracingReporter)
//!     .await;
//! assert_eq!(outcomes.len(), 2);
//! # }
//! ```

pub mod diagnostics;
pub mod engine;
pub mod options;
pub mod orchestrator;
pub mod output;
pub mod resolve;

use std::path::PathBuf;

use bundlekit_config::ConfigError;
use miette::Diagnostic;
use thiserror::Error;

pub use engine::{BundleEngine, EngineReport, LogEntry, LogLevel, RolldownEngine};
pub use options::{
    DEFAULT_ASSET_NAMING, EnvMode, ResolvedBuildOptions, baseline_externals,
};
pub use orchestrator::{
    BuildOutcome, BuildReporter, Orchestrator, TracingReporter, clean_output_dir,
};
pub use resolve::{ConfigResolver, Resolution, resolve_options};

// Re-export plugin types for callers assembling programmatic configs
pub use rolldown_plugin::{__inner::SharedPluginable, Plugin};

/// Error types for bundlekit-bundler operations.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// Descriptor or build config could not be loaded.
    #[error(transparent)]
    #[diagnostic(
        code(bundlekit::config),
        help("Check package.json and build.config.* in the package directory")
    )]
    Config(#[from] ConfigError),

    /// Output directory path exists but is a file.
    #[error("Output path exists but is not a directory: {}", .0.display())]
    #[diagnostic(code(bundlekit::outdir))]
    NotADirectory(PathBuf),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    #[diagnostic(code(bundlekit::output_path))]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    #[diagnostic(code(bundlekit::write))]
    WriteFailure(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(bundlekit::io))]
    Io(#[from] std::io::Error),
}

/// Result type alias for bundlekit-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;
