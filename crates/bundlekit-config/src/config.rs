//! Build configuration as written by a package.
//!
//! Every field is optional; defaults are applied later by the resolver in
//! `bundlekit-bundler`, never here.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use rolldown_plugin::__inner::SharedPluginable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Entry files, relative to the package directory.
    pub entrypoints: Vec<PathBuf>,

    /// Output directory, relative to the package directory.
    pub outdir: Option<PathBuf>,

    pub target: Option<Target>,

    pub format: Option<Format>,

    pub minify: Option<bool>,

    /// Output-kind (`entry`, `chunk`, `asset`) to naming pattern.
    pub naming: IndexMap<String, String>,

    /// Identifier to replacement. Strings are raw expression text, other
    /// literals are serialized as JSON.
    pub define: IndexMap<String, Value>,

    /// Plugins appended after the built-in ones. Only programmatic configs can
    /// carry these.
    #[serde(skip)]
    pub plugins: ExtraPlugins,

    pub external: Vec<String>,

    /// Arbitrary nested mapping read by the style token plugin.
    pub theme: Option<Value>,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entrypoint(mut self, entry: impl Into<PathBuf>) -> Self {
        self.entrypoints.push(entry.into());
        self
    }

    pub fn outdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.outdir = Some(dir.into());
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = Some(minify);
        self
    }

    pub fn external(mut self, specifier: impl Into<String>) -> Self {
        self.external.push(specifier.into());
        self
    }

    pub fn theme(mut self, theme: Value) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn plugin(mut self, plugin: SharedPluginable) -> Self {
        self.plugins.0.push(plugin);
        self
    }
}

/// Runtime the bundle is built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Browser,
    Node,
    Bun,
}

/// Module format of the emitted chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Esm,
    Cjs,
    Iife,
}

/// Caller-supplied plugin instances, in order.
#[derive(Clone, Default)]
pub struct ExtraPlugins(pub Vec<SharedPluginable>);

impl ExtraPlugins {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<SharedPluginable> {
        self.0
    }
}

impl fmt::Debug for ExtraPlugins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtraPlugins")
            .field("len", &self.0.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_all_fields() {
        let config: BuildConfig = serde_json::from_value(json!({
            "entrypoints": ["src/index.js"],
            "outdir": "build",
            "target": "node",
            "format": "cjs",
            "minify": false,
            "naming": { "chunk": "[name].js" },
            "define": { "VERSION": "\"1.0.0\"", "LEVEL": 3 },
            "external": ["lodash"],
            "theme": { "colors": { "primary": "#fff" } }
        }))
        .unwrap();

        assert_eq!(config.entrypoints, vec![PathBuf::from("src/index.js")]);
        assert_eq!(config.outdir, Some(PathBuf::from("build")));
        assert_eq!(config.target, Some(Target::Node));
        assert_eq!(config.format, Some(Format::Cjs));
        assert_eq!(config.minify, Some(false));
        assert_eq!(config.naming.get("chunk").map(String::as_str), Some("[name].js"));
        assert_eq!(config.define.get("LEVEL"), Some(&json!(3)));
        assert_eq!(config.external, vec!["lodash".to_string()]);
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let config: BuildConfig = serde_json::from_value(json!({})).unwrap();
        assert!(config.entrypoints.is_empty());
        assert!(config.outdir.is_none());
        assert!(config.target.is_none());
        assert!(config.format.is_none());
        assert!(config.minify.is_none());
        assert!(config.theme.is_none());
    }

    #[test]
    fn rejects_unknown_target() {
        let result: Result<BuildConfig, _> =
            serde_json::from_value(json!({ "target": "deno" }));
        assert!(result.is_err());
    }

    #[test]
    fn builder_methods_accumulate() {
        let config = BuildConfig::new()
            .entrypoint("a.js")
            .entrypoint("b.js")
            .external("lodash")
            .minify(true);
        assert_eq!(config.entrypoints.len(), 2);
        assert_eq!(config.external, vec!["lodash".to_string()]);
        assert_eq!(config.minify, Some(true));
    }
}
