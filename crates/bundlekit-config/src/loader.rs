//! Loading a build configuration file into a [`ConfigExport`].

use std::path::Path;

use async_trait::async_trait;
use figment::Figment;
use figment::providers::{Format as _, Json, Toml, Yaml};

use crate::config::BuildConfig;
use crate::error::{ConfigError, Result};
use crate::export::ConfigExport;

/// Produces the default export of a build configuration file.
///
/// File-backed loaders only ever yield [`ConfigExport::Value`]; embedders can
/// implement this to hand out factories or attach programmatic plugins.
#[async_trait]
pub trait ConfigLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<ConfigExport>;
}

/// On-disk format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Reads TOML, JSON or YAML config files through figment.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileConfigLoader;

impl FileConfigLoader {
    pub fn parse(format: ConfigFormat, content: &str) -> std::result::Result<BuildConfig, String> {
        let figment = match format {
            ConfigFormat::Toml => Figment::from(Toml::string(content)),
            ConfigFormat::Json => Figment::from(Json::string(content)),
            ConfigFormat::Yaml => Figment::from(Yaml::string(content)),
        };

        figment.extract().map_err(|e| e.to_string())
    }
}

#[async_trait]
impl ConfigLoader for FileConfigLoader {
    async fn load(&self, path: &Path) -> Result<ConfigExport> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

        tracing::debug!("Loading {:?} build config from {}", format, path.display());

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ConfigError::ConfigLoad {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;

        let config = Self::parse(format, &content).map_err(|message| ConfigError::ConfigLoad {
            path: path.to_path_buf(),
            message,
        })?;

        Ok(ConfigExport::Value(config))
    }
}
