//! Process environment snapshot.
//!
//! The environment is read once at process start and threaded into every build,
//! so resolution never consults ambient globals mid-build.

use std::collections::BTreeMap;

use crate::flags::is_true;

/// Variable selecting the release environment.
pub const RELEASE_VAR: &str = "BUILD_ENV";
/// Exact value of [`RELEASE_VAR`] that enables release behavior.
pub const RELEASE_VALUE: &str = "production";
/// Variable enabling beta features, interpreted with [`is_true`].
pub const BETA_VAR: &str = "BETA";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
    /// `BUILD_ENV=production`
    pub release: bool,
    /// `BETA` in `yes`/`on`/`true`
    pub beta: bool,
    /// Full variable snapshot, used when inlining `process.env` references.
    pub vars: BTreeMap<String, String>,
}

impl BuildEnv {
    /// Capture the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build a snapshot from explicit variables.
    ///
    /// ```
    /// use bundlekit_config::BuildEnv;
    ///
    /// let env = BuildEnv::from_vars([("BUILD_ENV", "production"), ("BETA", "on")]);
    /// assert!(env.release);
    /// assert!(env.beta);
    /// ```
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: BTreeMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let release = vars.get(RELEASE_VAR).map(String::as_str) == Some(RELEASE_VALUE);
        let beta = is_true(vars.get(BETA_VAR).map(String::as_str));

        tracing::debug!(release, beta, "captured build environment");

        Self {
            release,
            beta,
            vars,
        }
    }

    /// Debug builds are everything that is not a release build.
    pub fn debug(&self) -> bool {
        !self.release
    }
}
