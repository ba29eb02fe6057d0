//! [`BundleEngine`] backed by Rolldown.

use std::sync::Arc;

use async_trait::async_trait;
use bundlekit_config::{Format, Target};
use indexmap::IndexMap;
use rolldown::{
    BundlerBuilder, BundlerOptions, InputItem, IsExternal, OutputFormat, Platform,
    RawMinifyOptions,
};
use rolldown_plugin::__inner::SharedPluginable;

use super::external::ExternalPatternPlugin;
use super::{BundleEngine, EngineReport, LogEntry};
use crate::diagnostics::log_entries_from_rolldown;
use crate::options::{EnvMode, ResolvedBuildOptions};
use crate::output::write_bundle;

/// Runs Rolldown and writes its output into `outdir`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolldownEngine;

impl RolldownEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BundleEngine for RolldownEngine {
    async fn build(&self, options: ResolvedBuildOptions) -> EngineReport {
        if options.entrypoints.is_empty() {
            return EngineReport::failed(vec![LogEntry::error(format!(
                "No entrypoints configured for {}",
                options.cwd.display()
            ))]);
        }

        let outdir = options.outdir.clone();
        let (rolldown_options, plugins) = configure_rolldown_options(options);

        let mut bundler = match BundlerBuilder::default()
            .with_options(rolldown_options)
            .with_plugins(plugins)
            .build()
        {
            Ok(bundler) => bundler,
            Err(e) => return EngineReport::failed(log_entries_from_rolldown(&e)),
        };

        let output = match bundler.generate().await {
            Ok(output) => output,
            Err(e) => return EngineReport::failed(log_entries_from_rolldown(&e)),
        };

        match write_bundle(&output, &outdir).await {
            Ok(written) => {
                tracing::debug!(
                    "Wrote {} file(s) to {}",
                    written.len(),
                    outdir.display()
                );
                EngineReport::succeeded(Vec::new())
            }
            Err(e) => EngineReport::failed(vec![LogEntry::error(e.to_string())]),
        }
    }
}

/// Map resolved options onto Rolldown's options and plugin list.
fn configure_rolldown_options(
    options: ResolvedBuildOptions,
) -> (BundlerOptions, Vec<SharedPluginable>) {
    let ResolvedBuildOptions {
        cwd,
        entrypoints,
        outdir,
        target,
        format,
        minify,
        naming,
        env,
        define,
        mut plugins,
        external,
    } = options;

    let input = entrypoints
        .iter()
        .map(|entry| InputItem {
            name: None,
            import: entry.to_string_lossy().into_owned(),
        })
        .collect();

    let (exact, patterns) = ExternalPatternPlugin::partition(&external);
    if !patterns.is_empty() {
        plugins.insert(0, Arc::new(patterns));
    }

    let mut rolldown_options = BundlerOptions {
        input: Some(input),
        cwd: Some(cwd),
        dir: Some(outdir.to_string_lossy().into_owned()),
        platform: Some(platform_for(target)),
        format: Some(output_format_for(format)),
        minify: Some(RawMinifyOptions::from(minify)),
        external: Some(IsExternal::from(exact)),
        define: Some(define_pairs(&env, define).into_iter().collect()),
        ..Default::default()
    };

    for (kind, pattern) in naming {
        match kind.as_str() {
            "entry" => rolldown_options.entry_filenames = Some(pattern.into()),
            "chunk" => rolldown_options.chunk_filenames = Some(pattern.into()),
            "asset" => rolldown_options.asset_filenames = Some(pattern.into()),
            other => tracing::warn!("Ignoring unknown naming kind '{}'", other),
        }
    }

    (rolldown_options, plugins)
}

fn platform_for(target: Target) -> Platform {
    match target {
        Target::Browser => Platform::Browser,
        Target::Node | Target::Bun => Platform::Node,
    }
}

fn output_format_for(format: Format) -> OutputFormat {
    match format {
        Format::Esm => OutputFormat::Esm,
        Format::Cjs => OutputFormat::Cjs,
        Format::Iife => OutputFormat::Iife,
    }
}

/// Inline env replacements first, then the resolved defines on top.
fn define_pairs(env: &EnvMode, define: IndexMap<String, String>) -> IndexMap<String, String> {
    let mut pairs = IndexMap::new();

    let EnvMode::Inline(vars) = env;
    for (name, value) in vars.iter().filter(|(name, _)| is_identifier(name)) {
        pairs.insert(format!("process.env.{name}"), json_string(value));
    }

    pairs.extend(define);
    pairs
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
