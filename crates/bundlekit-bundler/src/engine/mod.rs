//! The bundling engine boundary.
//!
//! An engine receives one [`ResolvedBuildOptions`] and reports success plus
//! diagnostics. A failed build is data in the report, never an `Err`.

mod external;
mod rolldown_engine;

use std::fmt;

use async_trait::async_trait;

use crate::options::ResolvedBuildOptions;

pub use external::ExternalPatternPlugin;
pub use rolldown_engine::RolldownEngine;

#[async_trait]
pub trait BundleEngine: Send + Sync {
    async fn build(&self, options: ResolvedBuildOptions) -> EngineReport;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warning => write!(f, "warning"),
            LogLevel::Info => write!(f, "info"),
        }
    }
}

/// One diagnostic produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineReport {
    pub success: bool,
    pub logs: Vec<LogEntry>,
}

impl EngineReport {
    pub fn succeeded(logs: Vec<LogEntry>) -> Self {
        Self {
            success: true,
            logs,
        }
    }

    pub fn failed(logs: Vec<LogEntry>) -> Self {
        Self {
            success: false,
            logs,
        }
    }
}
