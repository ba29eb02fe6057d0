//! Package descriptor (`package.json`) loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// The subset of `package.json` the build driver cares about.
///
/// Loaded fresh for every build; nothing is cached between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageDescriptor {
    /// Read and parse the descriptor at `path`.
    pub async fn load(path: &Path) -> Result<Self> {
        tracing::trace!("Loading package descriptor: {}", path.display());

        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ConfigError::DescriptorLoad {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;

        Self::parse(&content).map_err(|message| ConfigError::DescriptorLoad {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("Invalid JSON: {e}"))
    }
}
