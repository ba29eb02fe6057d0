//! Error types for descriptor and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `package.json` could not be read or is not a valid descriptor.
    #[error("failed to load package descriptor {}: {message}", .path.display())]
    DescriptorLoad { path: PathBuf, message: String },

    /// The build configuration file could not be read or parsed.
    #[error("failed to load build config {}: {message}", .path.display())]
    ConfigLoad { path: PathBuf, message: String },

    /// A config factory (sync or deferred) failed while producing its value.
    #[error("build config factory failed: {0}")]
    Factory(String),

    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
