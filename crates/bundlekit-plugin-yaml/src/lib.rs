//! Rolldown plugin that loads YAML files as JavaScript modules.
//!
//! The `load` hook intercepts `.yaml` / `.yml` files, parses them and hands
//! Rolldown a module whose default export is the parsed document:
//!
//! ```text
//! theme.yaml → load() hook → serde_yaml → JSON literal → `export default {...};`
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use bundlekit_plugin_yaml::YamlLoaderPlugin;
//! use std::sync::Arc;
//!
//! let plugin = Arc::new(YamlLoaderPlugin::new());
//! ```

use anyhow::Context;
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, Plugin, PluginContext};
use serde_json::Value;
use std::borrow::Cow;
use std::path::Path;

/// Extensions handled by the loader.
pub const YAML_EXTENSIONS: [&str; 2] = [".yaml", ".yml"];

/// Rolldown plugin turning YAML documents into ES modules.
#[derive(Debug, Clone, Default)]
pub struct YamlLoaderPlugin;

impl YamlLoaderPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Whether `id` names a YAML file.
    pub fn handles(id: &str) -> bool {
        YAML_EXTENSIONS.iter().any(|ext| id.ends_with(ext))
    }

    /// Compile YAML source into module code exporting the parsed value.
    ///
    /// Malformed input fails the whole file; there is no partial recovery.
    pub fn compile(path: &Path, source: &str) -> anyhow::Result<String> {
        let value: Value = serde_yaml::from_str(source)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        let literal = serde_json::to_string(&value)
            .with_context(|| format!("Failed to serialize YAML file: {}", path.display()))?;

        Ok(format!("export default {literal};\n"))
    }
}

impl Plugin for YamlLoaderPlugin {
    fn name(&self) -> Cow<'static, str> {
        "bundlekit-yaml".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        use rolldown_plugin::HookUsage;
        HookUsage::Load
    }

    /// Load hook - returns `Ok(None)` for anything that is not YAML so
    /// Rolldown falls back to its own loaders.
    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();

        async move {
            if !Self::handles(&id) {
                return Ok(None);
            }

            let source = tokio::fs::read_to_string(&id)
                .await
                .with_context(|| format!("Failed to read YAML file: {}", id))?;

            let code = Self::compile(Path::new(&id), &source)?;

            tracing::debug!(path = %id, bytes = code.len(), "YAML compiled to module");

            Ok(Some(HookLoadOutput {
                code: code.into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}
