//! The three shapes a build configuration can be exported in.
//!
//! A config is either a plain value, a zero-argument factory, or a
//! zero-argument factory producing a future. [`ConfigExport::resolve`] turns
//! any of them into one concrete [`BuildConfig`] before defaults are merged.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;

use crate::config::BuildConfig;
use crate::error::Result;

pub type ConfigFactory = Box<dyn FnOnce() -> Result<BuildConfig> + Send>;

pub type DeferredConfigFactory =
    Box<dyn FnOnce() -> BoxFuture<'static, Result<BuildConfig>> + Send>;

pub enum ConfigExport {
    Value(BuildConfig),
    Factory(ConfigFactory),
    Deferred(DeferredConfigFactory),
}

impl ConfigExport {
    pub fn factory<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<BuildConfig> + Send + 'static,
    {
        Self::Factory(Box::new(f))
    }

    /// Wrap an async factory.
    ///
    /// ```
    /// use bundlekit_config::{BuildConfig, ConfigExport};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let export = ConfigExport::deferred(|| async { Ok(BuildConfig::new().minify(false)) });
    /// let config = export.resolve().await.unwrap();
    /// assert_eq!(config.minify, Some(false));
    /// # }
    /// ```
    pub fn deferred<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<BuildConfig>> + Send + 'static,
    {
        Self::Deferred(Box::new(move || Box::pin(f())))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Factory(_) => "factory",
            Self::Deferred(_) => "deferred",
        }
    }

    /// Normalize to a concrete config. Plain values skip invocation and
    /// synchronous factories skip awaiting.
    pub async fn resolve(self) -> Result<BuildConfig> {
        tracing::trace!("Resolving {} config export", self.kind());
        match self {
            Self::Value(config) => Ok(config),
            Self::Factory(factory) => factory(),
            Self::Deferred(factory) => factory().await,
        }
    }
}

impl From<BuildConfig> for ConfigExport {
    fn from(config: BuildConfig) -> Self {
        Self::Value(config)
    }
}

impl fmt::Debug for ConfigExport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(config) => f.debug_tuple("Value").field(config).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn value_is_identity() {
        let export = ConfigExport::from(BuildConfig::new().entrypoint("a.js"));
        assert_eq!(export.kind(), "value");
        let config = export.resolve().await.unwrap();
        assert_eq!(config.entrypoints, vec![PathBuf::from("a.js")]);
    }

    #[tokio::test]
    async fn factory_is_invoked_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let export = ConfigExport::factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(BuildConfig::new().entrypoint("a.js"))
        });

        let config = export.resolve().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(config.entrypoints.len(), 1);
    }

    #[tokio::test]
    async fn deferred_factory_is_awaited() {
        let export = ConfigExport::deferred(|| async {
            tokio::task::yield_now().await;
            Ok(BuildConfig::new().minify(false))
        });
        assert_eq!(export.kind(), "deferred");
        assert_eq!(export.resolve().await.unwrap().minify, Some(false));
    }

    #[tokio::test]
    async fn factory_errors_propagate() {
        let export =
            ConfigExport::deferred(|| async { Err(ConfigError::Factory("boom".into())) });
        let err = export.resolve().await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
