//! From a package directory to [`ResolvedBuildOptions`].
//!
//! Resolution runs in fixed steps: discover the descriptor and config files,
//! load the descriptor, load and normalize the config export, merge defaults.
//! The merge itself ([`resolve_options`]) is a pure function of the directory,
//! the concrete config and the environment snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bundlekit_config::{
    BuildConfig, BuildEnv, ConfigLoader, FileConfigLoader, PackageDescriptor, ProjectDiscovery,
    ProjectFiles,
};
use bundlekit_plugin_css::{StyleTokenOptions, StyleTokenPlugin};
use bundlekit_plugin_yaml::YamlLoaderPlugin;
use indexmap::{IndexMap, IndexSet};
use path_clean::PathClean;
use rolldown_plugin::__inner::SharedPluginable;
use serde_json::Value;

use crate::Result;
use crate::options::{DEFAULT_ASSET_NAMING, EnvMode, ResolvedBuildOptions, baseline_externals};

/// Result of resolving one directory.
#[derive(Debug)]
pub enum Resolution {
    /// The directory lacks a descriptor or a build config.
    Skipped,
    Ready {
        descriptor: PackageDescriptor,
        options: ResolvedBuildOptions,
    },
}

/// Loads packages and resolves their build options against one environment
/// snapshot.
pub struct ConfigResolver {
    loader: Box<dyn ConfigLoader>,
    env: BuildEnv,
}

impl ConfigResolver {
    /// Resolver reading config files from disk.
    pub fn new(env: BuildEnv) -> Self {
        Self::with_loader(FileConfigLoader, env)
    }

    /// Resolver with a custom config loader, e.g. one producing factories.
    pub fn with_loader(loader: impl ConfigLoader + 'static, env: BuildEnv) -> Self {
        Self {
            loader: Box::new(loader),
            env,
        }
    }

    pub fn env(&self) -> &BuildEnv {
        &self.env
    }

    /// Locate both package files. `None` means the directory is skipped.
    pub fn discover(&self, dir: &Path) -> Result<Option<ProjectFiles>> {
        let dir = absolute_dir(dir)?;
        let files = ProjectDiscovery::new(&dir).find();
        if files.is_none() {
            tracing::trace!("Skipping {}: not a package", dir.display());
        }
        Ok(files)
    }

    pub async fn load_descriptor(&self, files: &ProjectFiles) -> Result<PackageDescriptor> {
        Ok(PackageDescriptor::load(&files.descriptor).await?)
    }

    /// Load the config export, normalize it once, and merge defaults.
    pub async fn load_options(&self, files: &ProjectFiles) -> Result<ResolvedBuildOptions> {
        let export = self.loader.load(&files.config).await?;
        let config = export.resolve().await?;
        Ok(resolve_options(&files.dir, config, &self.env))
    }

    /// Run every step for `dir`.
    pub async fn resolve(&self, dir: &Path) -> Result<Resolution> {
        let Some(files) = self.discover(dir)? else {
            return Ok(Resolution::Skipped);
        };

        let descriptor = self.load_descriptor(&files).await?;
        let options = self.load_options(&files).await?;

        Ok(Resolution::Ready {
            descriptor,
            options,
        })
    }
}

/// Merge a concrete config with defaults.
///
/// Caller values win per key for `naming` and `define`. Plugins are the YAML
/// loader, then the style token rewriter, then caller plugins. Externals keep
/// the baseline order, append caller entries, and drop duplicates.
pub fn resolve_options(dir: &Path, config: BuildConfig, env: &BuildEnv) -> ResolvedBuildOptions {
    let BuildConfig {
        entrypoints,
        outdir,
        target,
        format,
        minify,
        naming: config_naming,
        define: config_define,
        plugins: extra_plugins,
        external: config_external,
        theme,
    } = config;

    let entrypoints = entrypoints
        .iter()
        .map(|entry| within(dir, entry))
        .collect();

    let outdir = match outdir {
        Some(outdir) => within(dir, &outdir),
        None => dir.join("dist").clean(),
    };

    let mut naming = IndexMap::new();
    naming.insert("asset".to_string(), DEFAULT_ASSET_NAMING.to_string());
    naming.extend(config_naming);

    let mut define = IndexMap::new();
    define.insert("DEBUG".to_string(), env.debug().to_string());
    define.insert("BETA".to_string(), env.beta.to_string());
    define.extend(
        config_define
            .into_iter()
            .map(|(key, value)| (key, define_expression(&value))),
    );

    let minify = minify.unwrap_or(env.release);

    let mut plugins: Vec<SharedPluginable> = vec![
        Arc::new(YamlLoaderPlugin::new()),
        Arc::new(StyleTokenPlugin::with_options(
            theme,
            StyleTokenOptions::new().with_minify(minify),
        )),
    ];
    plugins.extend(extra_plugins.into_vec());

    let external: IndexSet<String> = baseline_externals(env.release)
        .into_iter()
        .chain(config_external)
        .collect();

    let options = ResolvedBuildOptions {
        cwd: dir.to_path_buf(),
        entrypoints,
        outdir,
        target: target.unwrap_or_default(),
        format: format.unwrap_or_default(),
        minify,
        naming,
        env: EnvMode::Inline(env.vars.clone()),
        define,
        plugins,
        external: external.into_iter().collect(),
    };

    tracing::debug!(
        dir = %dir.display(),
        outdir = %options.outdir.display(),
        entries = options.entrypoints.len(),
        plugins = options.plugins.len(),
        "resolved build options"
    );

    options
}

/// Strings are expression text; every other value is JSON.
fn define_expression(value: &Value) -> String {
    match value {
        Value::String(expr) => expr.clone(),
        other => other.to_string(),
    }
}

fn within(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf().clean()
    } else {
        dir.join(path).clean()
    }
}

fn absolute_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.to_path_buf().clean();
    if cleaned.is_absolute() {
        Ok(cleaned)
    } else {
        Ok(std::env::current_dir()?.join(cleaned).clean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundlekit_config::{Format, Target};
    use serde_json::json;

    fn dev_env() -> BuildEnv {
        BuildEnv::default()
    }

    fn release_env() -> BuildEnv {
        BuildEnv::from_vars([("BUILD_ENV", "production")])
    }

    #[test]
    fn applies_defaults() {
        let dir = Path::new("/work/pkg");
        let options = resolve_options(dir, BuildConfig::new().entrypoint("a.js"), &dev_env());

        assert_eq!(options.cwd, dir);
        assert_eq!(options.entrypoints, vec![PathBuf::from("/work/pkg/a.js")]);
        assert_eq!(options.outdir, PathBuf::from("/work/pkg/dist"));
        assert_eq!(options.target, Target::Browser);
        assert_eq!(options.format, Format::Esm);
        assert!(!options.minify);
        assert_eq!(options.naming["asset"], DEFAULT_ASSET_NAMING);
        assert_eq!(
            options.plugin_names(),
            vec!["bundlekit-yaml", "bundlekit-style-token"]
        );
    }

    #[test]
    fn minify_follows_release_unless_set() {
        let dir = Path::new("/work/pkg");
        assert!(resolve_options(dir, BuildConfig::new(), &release_env()).minify);
        assert!(!resolve_options(dir, BuildConfig::new().minify(false), &release_env()).minify);
        assert!(resolve_options(dir, BuildConfig::new().minify(true), &dev_env()).minify);
    }

    #[test]
    fn relative_outdir_is_inside_package() {
        let dir = Path::new("/work/pkg");
        let options = resolve_options(dir, BuildConfig::new().outdir("./build/../out"), &dev_env());
        assert_eq!(options.outdir, PathBuf::from("/work/pkg/out"));

        let options = resolve_options(dir, BuildConfig::new().outdir("/tmp/elsewhere"), &dev_env());
        assert_eq!(options.outdir, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    fn naming_overlay_keeps_default_for_gaps() {
        let mut config = BuildConfig::new();
        config
            .naming
            .insert("entry".to_string(), "[dir]/[name].js".to_string());

        let options = resolve_options(Path::new("/p"), config, &dev_env());
        assert_eq!(options.naming["asset"], DEFAULT_ASSET_NAMING);
        assert_eq!(options.naming["entry"], "[dir]/[name].js");

        let mut config = BuildConfig::new();
        config
            .naming
            .insert("asset".to_string(), "static/[name].[ext]".to_string());
        let options = resolve_options(Path::new("/p"), config, &dev_env());
        assert_eq!(options.naming["asset"], "static/[name].[ext]");
        assert_eq!(options.naming.len(), 1);
    }

    #[test]
    fn define_has_builtin_flags() {
        let options = resolve_options(Path::new("/p"), BuildConfig::new(), &dev_env());
        assert_eq!(options.define["DEBUG"], "true");
        assert_eq!(options.define["BETA"], "false");

        let env = BuildEnv::from_vars([("BUILD_ENV", "production"), ("BETA", "on")]);
        let options = resolve_options(Path::new("/p"), BuildConfig::new(), &env);
        assert_eq!(options.define["DEBUG"], "false");
        assert_eq!(options.define["BETA"], "true");
    }

    #[test]
    fn caller_define_wins() {
        let mut config = BuildConfig::new();
        config.define.insert("DEBUG".to_string(), json!(false));
        config
            .define
            .insert("VERSION".to_string(), json!("\"1.0.0\""));
        config.define.insert("LIMIT".to_string(), json!(10));

        let options = resolve_options(Path::new("/p"), config, &dev_env());
        assert_eq!(options.define["DEBUG"], "false");
        assert_eq!(options.define["VERSION"], "\"1.0.0\"");
        assert_eq!(options.define["LIMIT"], "10");
        assert_eq!(options.define["BETA"], "false");
    }

    #[test]
    fn externals_union_keeps_baseline_first() {
        let config = BuildConfig::new().external("lodash").external("preact");
        let options = resolve_options(Path::new("/p"), config, &dev_env());

        let mut expected = baseline_externals(false);
        expected.push("lodash".to_string());
        assert_eq!(options.external, expected);
        assert_eq!(
            options.external.iter().filter(|e| *e == "preact").count(),
            1
        );
    }

    #[derive(Debug)]
    struct CallerPlugin;

    impl rolldown_plugin::Plugin for CallerPlugin {
        fn name(&self) -> std::borrow::Cow<'static, str> {
            "caller".into()
        }

        fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
            rolldown_plugin::HookUsage::empty()
        }
    }

    #[test]
    fn caller_plugins_come_last() {
        let config = BuildConfig::new().plugin(Arc::new(CallerPlugin));
        let options = resolve_options(Path::new("/p"), config, &dev_env());
        assert_eq!(
            options.plugin_names(),
            vec!["bundlekit-yaml", "bundlekit-style-token", "caller"]
        );
    }

    #[test]
    fn style_token_plugin_follows_resolved_minify() {
        let release = resolve_options(Path::new("/p"), BuildConfig::new(), &release_env());
        let debug = format!("{:?}", release.plugins[1]);
        assert!(debug.contains("StyleTokenPlugin"), "{debug}");
        assert!(debug.contains("minify: true"), "{debug}");

        let dev = resolve_options(Path::new("/p"), BuildConfig::new(), &dev_env());
        let debug = format!("{:?}", dev.plugins[1]);
        assert!(debug.contains("minify: false"), "{debug}");
    }

    #[test]
    fn env_is_inlined_from_snapshot() {
        let env = BuildEnv::from_vars([("API_URL", "https://api.test")]);
        let options = resolve_options(Path::new("/p"), BuildConfig::new(), &env);
        let EnvMode::Inline(vars) = options.env;
        assert_eq!(vars["API_URL"], "https://api.test");
    }

    #[test]
    fn absolute_dir_cleans_relative_input() {
        let resolved = absolute_dir(Path::new("pkg/./nested/..")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("pkg"));
    }
}
