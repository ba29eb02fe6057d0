//! Fully resolved options handed to a bundling engine.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use bundlekit_config::{Format, Target};
use indexmap::IndexMap;
use rolldown_plugin::Pluginable;
use rolldown_plugin::__inner::SharedPluginable;

/// Naming pattern applied to emitted assets unless the config overrides it.
pub const DEFAULT_ASSET_NAMING: &str = "assets/[name]-[hash].[ext]";

/// How `process.env` references are treated by the engine. Builds always
/// inline: `process.env.NAME` is replaced with the captured value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvMode {
    Inline(BTreeMap<String, String>),
}

/// Options for exactly one package build. Constructed by the resolver and
/// consumed by value; never shared between directories.
#[derive(Clone)]
pub struct ResolvedBuildOptions {
    /// Package directory, absolute. Used as the engine's working directory.
    pub cwd: PathBuf,
    pub entrypoints: Vec<PathBuf>,
    pub outdir: PathBuf,
    pub target: Target,
    pub format: Format,
    pub minify: bool,
    pub naming: IndexMap<String, String>,
    pub env: EnvMode,
    /// Identifier to replacement expression text.
    pub define: IndexMap<String, String>,
    /// Built-in plugins first, then caller plugins.
    pub plugins: Vec<SharedPluginable>,
    /// Baseline first, then caller additions. No duplicates.
    pub external: Vec<String>,
}

impl ResolvedBuildOptions {
    /// Plugin names in the order the engine runs them.
    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins
            .iter()
            .map(|plugin| plugin.call_name().into_owned())
            .collect()
    }
}

impl fmt::Debug for ResolvedBuildOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedBuildOptions")
            .field("cwd", &self.cwd)
            .field("entrypoints", &self.entrypoints)
            .field("outdir", &self.outdir)
            .field("target", &self.target)
            .field("format", &self.format)
            .field("minify", &self.minify)
            .field("naming", &self.naming)
            .field("env", &self.env)
            .field("define", &self.define)
            .field("plugins", &self.plugin_names())
            .field("external", &self.external)
            .finish()
    }
}

/// Specifiers that are never bundled.
///
/// The JSX runtime entry differs between release and development builds.
pub fn baseline_externals(release: bool) -> Vec<String> {
    let jsx_runtime = if release {
        "preact/jsx-runtime"
    } else {
        "preact/jsx-dev-runtime"
    };

    vec![
        "preact".to_string(),
        "preact/hooks".to_string(),
        jsx_runtime.to_string(),
        "@preact/signals".to_string(),
        "@blockcode/*".to_string(),
    ]
}
