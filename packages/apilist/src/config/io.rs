//! Configuration I/O (YAML loading)

use std::path::Path;

use tracing::debug;

use super::BatchConfig;
use crate::error::{ApiListError, Result};

impl BatchConfig {
    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ApiListError::file_access(path, e))?;
        let config = Self::from_yaml_str(&text).map_err(|e| e.with_path(path))?;
        debug!(
            "loaded config {} ({} namespaces)",
            path.display(),
            config.namespaces.len()
        );
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: BatchConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
