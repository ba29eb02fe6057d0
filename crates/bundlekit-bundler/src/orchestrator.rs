//! Per-directory build driver.
//!
//! For one directory: resolve, clear the output directory, run the engine,
//! report. [`Orchestrator::build_all`] does that for each directory in order,
//! and an error in one directory never stops the next.

use std::path::{Path, PathBuf};

use bundlekit_config::BuildEnv;

use crate::engine::{BundleEngine, LogEntry, LogLevel};
use crate::resolve::ConfigResolver;
use crate::{Error, Result};

/// What happened to one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Not a package; nothing was touched.
    Skipped,
    Built { name: String },
    /// The engine ran and reported failure.
    Failed { name: String, logs: Vec<LogEntry> },
}

impl BuildOutcome {
    pub fn is_built(&self) -> bool {
        matches!(self, BuildOutcome::Built { .. })
    }
}

/// Receives progress for each package build.
pub trait BuildReporter: Send + Sync {
    /// The descriptor was loaded and the build is about to start.
    fn started(&self, name: &str);

    fn completed(&self, name: &str);

    /// The engine reported failure.
    fn failed(&self, name: &str, logs: &[LogEntry]);

    /// Resolution or output preparation raised an error for `dir`.
    fn errored(&self, dir: &Path, error: &Error);
}

/// Reporter that only emits tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl BuildReporter for TracingReporter {
    fn started(&self, name: &str) {
        tracing::info!("{} is building...", name);
    }

    fn completed(&self, name: &str) {
        tracing::info!("{} is complete.", name);
    }

    fn failed(&self, name: &str, logs: &[LogEntry]) {
        tracing::error!("{} failed to build", name);
        for entry in logs {
            match entry.level {
                LogLevel::Error => tracing::error!("{}", entry.message),
                LogLevel::Warning => tracing::warn!("{}", entry.message),
                LogLevel::Info => tracing::info!("{}", entry.message),
            }
        }
    }

    fn errored(&self, dir: &Path, error: &Error) {
        tracing::error!("{}: {}", dir.display(), error);
    }
}

pub struct Orchestrator<E> {
    engine: E,
    resolver: ConfigResolver,
}

impl<E: BundleEngine> Orchestrator<E> {
    pub fn new(engine: E, env: BuildEnv) -> Self {
        Self::with_resolver(engine, ConfigResolver::new(env))
    }

    pub fn with_resolver(engine: E, resolver: ConfigResolver) -> Self {
        Self { engine, resolver }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Build one directory.
    ///
    /// Load failures are returned as `Err`; an unsuccessful engine run is
    /// `Ok(BuildOutcome::Failed)`.
    pub async fn build_dir(
        &self,
        dir: &Path,
        reporter: &dyn BuildReporter,
    ) -> Result<BuildOutcome> {
        let Some(files) = self.resolver.discover(dir)? else {
            return Ok(BuildOutcome::Skipped);
        };

        let descriptor = self.resolver.load_descriptor(&files).await?;
        let name = descriptor.name;
        reporter.started(&name);

        let options = self.resolver.load_options(&files).await?;

        clean_output_dir(&options.outdir).await?;

        let report = self.engine.build(options).await;
        if report.success {
            reporter.completed(&name);
            Ok(BuildOutcome::Built { name })
        } else {
            reporter.failed(&name, &report.logs);
            Ok(BuildOutcome::Failed {
                name,
                logs: report.logs,
            })
        }
    }

    /// Build every directory in order, one at a time.
    ///
    /// Errors are handed to the reporter and kept in the returned list at the
    /// directory's position.
    pub async fn build_all<I, P>(
        &self,
        dirs: I,
        reporter: &dyn BuildReporter,
    ) -> Vec<Result<BuildOutcome>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut outcomes = Vec::new();

        for dir in dirs {
            let dir = dir.as_ref();
            let outcome = self.build_dir(dir, reporter).await;
            if let Err(e) = &outcome {
                reporter.errored(dir, e);
            }
            outcomes.push(outcome);
        }

        outcomes
    }
}

/// Empty `out_dir`, creating it if missing. The directory itself is kept.
pub async fn clean_output_dir(out_dir: &Path) -> Result<()> {
    match tokio::fs::metadata(out_dir).await {
        Ok(meta) if !meta.is_dir() => {
            return Err(Error::NotADirectory(out_dir.to_path_buf()));
        }
        Ok(_) => {
            let mut entries = tokio::fs::read_dir(out_dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path: PathBuf = entry.path();
                if entry.file_type().await?.is_dir() {
                    tokio::fs::remove_dir_all(&path).await?;
                } else {
                    tokio::fs::remove_file(&path).await?;
                }
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tokio::fs::create_dir_all(out_dir).await?;
        }
        Err(e) => return Err(e.into()),
    }

    tracing::trace!("Cleared {}", out_dir.display());
    Ok(())
}
