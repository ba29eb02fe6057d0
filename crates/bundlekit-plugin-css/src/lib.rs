//! Rolldown plugin resolving theme tokens in CSS with lightningcss
//!
//! This plugin uses the `load` hook to intercept `.css` files, parses them with
//! lightningcss and walks the stylesheet with a visitor. Every call to the token
//! function (`token("colors.primary")` by default) is replaced by the raw theme
//! value found at that dotted path.
//!
//! ## Architecture
//!
//! ```text
//! .css file → load() hook → lightningcss parse → token visitor → print → CSS
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use bundlekit_plugin_css::StyleTokenPlugin;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let theme = json!({ "colors": { "primary": "#fff" } });
//! let plugin = Arc::new(StyleTokenPlugin::new(Some(theme)));
//! ```

use anyhow::Context;
use rolldown_common::ModuleType;
use rolldown_plugin::{HookLoadArgs, HookLoadOutput, HookLoadReturn, Plugin, PluginContext};
use serde_json::Value;
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

mod config;
mod rewrite;

pub use config::{DEFAULT_TOKEN_FUNCTION, StyleTokenOptions, baseline_browsers};
pub use rewrite::rewrite_css;

/// Rolldown plugin that replaces token function calls with theme values.
///
/// The theme is a snapshot taken at construction time and is never mutated.
#[derive(Debug, Clone)]
pub struct StyleTokenPlugin {
    theme: Option<Arc<Value>>,
    options: StyleTokenOptions,
}

impl StyleTokenPlugin {
    pub fn new(theme: Option<Value>) -> Self {
        Self::with_options(theme, StyleTokenOptions::default())
    }

    pub fn with_options(theme: Option<Value>, options: StyleTokenOptions) -> Self {
        Self {
            theme: theme.map(Arc::new),
            options,
        }
    }

    pub fn theme(&self) -> Option<&Value> {
        self.theme.as_deref()
    }

    pub fn options(&self) -> &StyleTokenOptions {
        &self.options
    }

    /// Rewrite one stylesheet.
    pub fn process_css(&self, path: &Path, source: &str) -> anyhow::Result<String> {
        rewrite_css(path, source, self.theme(), &self.options)
    }
}

impl Plugin for StyleTokenPlugin {
    fn name(&self) -> Cow<'static, str> {
        "bundlekit-style-token".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        use rolldown_plugin::HookUsage;
        HookUsage::Load
    }

    /// Load hook - intercepts `.css` files
    ///
    /// # Returns
    ///
    /// - `Ok(Some(output))` - rewritten CSS with `ModuleType::Css`
    /// - `Ok(None)` - not a CSS file, let Rolldown handle it
    /// - `Err(e)` - read or parse failure naming the file
    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        // Capture data needed for async block to avoid lifetime issues
        let id = args.id.to_string();
        let plugin = self.clone();

        async move {
            if !id.ends_with(".css") {
                return Ok(None);
            }

            let source = tokio::fs::read_to_string(&id)
                .await
                .with_context(|| format!("Failed to read CSS file: {}", id))?;

            let processed = plugin.process_css(Path::new(&id), &source)?;

            tracing::debug!(
                "[style-token] Processed {} ({} → {} bytes)",
                id,
                source.len(),
                processed.len()
            );

            Ok(Some(HookLoadOutput {
                code: processed.into(),
                module_type: Some(ModuleType::Css),
                ..Default::default()
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plugin_creation() {
        let plugin = StyleTokenPlugin::new(None);
        assert_eq!(plugin.name(), "bundlekit-style-token");
        assert!(plugin.theme().is_none());
    }

    #[test]
    fn test_theme_snapshot_is_untouched() {
        let theme = json!({ "colors": { "primary": "#fff" } });
        let plugin = StyleTokenPlugin::new(Some(theme.clone()));

        plugin
            .process_css(Path::new("a.css"), r#"a { color: token("colors.primary"); }"#)
            .unwrap();
        plugin
            .process_css(Path::new("b.css"), r#"b { color: token("colors.nope"); }"#)
            .unwrap();

        assert_eq!(plugin.theme(), Some(&theme));
    }

    #[test]
    fn test_process_with_minification() {
        let plugin = StyleTokenPlugin::with_options(
            Some(json!({ "colors": { "bg": "blue" } })),
            StyleTokenOptions::new().with_minify(true),
        );

        let css = "body {\n  color: red;\n  background: token(\"colors.bg\");\n}";
        let result = plugin.process_css(Path::new("test.css"), css).unwrap();

        assert!(result.len() < css.len());
        assert!(result.contains("color"));
        assert!(result.contains("blue"));
    }
}
