//! bundlekit command line.
//!
//! `bundlekit <dir>...` builds each package directory in the order given.
//! A directory that fails is reported and the next one still builds; the
//! process always exits successfully.
//!
//! - [`cli`] - argument definition
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal output and the build reporter
//! - [`error`] - miette rendering for per-directory errors

pub mod cli;
pub mod error;
pub mod logger;
pub mod ui;

use bundlekit_bundler::{BuildOutcome, Orchestrator, RolldownEngine};
use bundlekit_config::BuildEnv;

/// Build every directory named on the command line.
///
/// Returns the number of packages built successfully.
pub async fn run(args: cli::Cli) -> usize {
    let env = BuildEnv::from_env();
    let orchestrator = Orchestrator::new(RolldownEngine::new(), env);
    let reporter = ui::TerminalReporter::new();

    let outcomes = orchestrator.build_all(&args.dirs, &reporter).await;

    let built = outcomes
        .iter()
        .filter(|outcome| outcome.as_ref().is_ok_and(BuildOutcome::is_built))
        .count();
    tracing::debug!("{} of {} directories built", built, outcomes.len());
    built
}
