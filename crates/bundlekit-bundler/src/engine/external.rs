//! Wildcard external specifiers (`@scope/*`).
//!
//! Rolldown's `external` option takes exact specifiers; anything ending in
//! `/*` is matched here in `resolve_id` instead.

use std::borrow::Cow;

use rolldown_common::ResolvedExternal;
use rolldown_plugin::{
    HookResolveIdArgs, HookResolveIdOutput, HookResolveIdReturn, HookUsage, Plugin,
    PluginContext,
};

#[derive(Debug, Clone, Default)]
pub struct ExternalPatternPlugin {
    /// Prefixes including the trailing slash, e.g. `@blockcode/`.
    prefixes: Vec<String>,
}

impl ExternalPatternPlugin {
    /// Split `externals` into exact specifiers (returned) and wildcard
    /// patterns (kept by the plugin).
    pub fn partition(externals: &[String]) -> (Vec<String>, Self) {
        let mut exact = Vec::new();
        let mut prefixes = Vec::new();

        for specifier in externals {
            match specifier.strip_suffix('*') {
                Some(prefix) if prefix.ends_with('/') => prefixes.push(prefix.to_string()),
                _ => exact.push(specifier.clone()),
            }
        }

        (exact, Self { prefixes })
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn matches(&self, specifier: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| specifier.starts_with(prefix.as_str()) && specifier.len() > prefix.len())
    }
}

impl Plugin for ExternalPatternPlugin {
    fn name(&self) -> Cow<'static, str> {
        "bundlekit-external-patterns".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::ResolveId
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let specifier = args.specifier.to_string();
        let external = self.matches(&specifier);

        async move {
            if !external {
                return Ok(None);
            }

            tracing::trace!("Externalizing {}", specifier);
            Ok(Some(HookResolveIdOutput {
                id: specifier.into(),
                external: Some(ResolvedExternal::Bool(true)),
                ..Default::default()
            }))
        }
    }
}
