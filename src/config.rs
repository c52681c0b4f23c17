use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::engine::PyrolysisEngine;
use crate::mass_balance::EconomicParameters;
use crate::yield_model::YieldTables;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Recalibration knobs. Any section left out keeps its built-in values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub economics: EconomicParameters,
    pub yields: YieldTables,
}

impl EngineConfig {
    /// Rule tables are validated while parsing; a gap or overlap is a parse error.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    pub fn into_engine(self) -> PyrolysisEngine {
        PyrolysisEngine::with_tables(self.yields, self.economics)
    }
}
