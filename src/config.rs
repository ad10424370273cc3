//! Analyzer configuration, loadable from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{BiasError, Result};
use crate::publications::DEFAULT_MIN_PUBLICATIONS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Publication weight a letter needs to avoid the "too few" summary
    pub min_publications: f64,
    /// Replacement effort word list
    pub effort_words: Option<PathBuf>,
    /// Replacement accomplishment word list
    pub accomplishment_words: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_publications: DEFAULT_MIN_PUBLICATIONS,
            effort_words: None,
            accomplishment_words: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| BiasError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| BiasError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_publications.is_finite() || self.min_publications < 0.0 {
            return Err(BiasError::Configuration(format!(
                "min_publications must be a non-negative number, got {}",
                self.min_publications
            )));
        }
        for path in [&self.effort_words, &self.accomplishment_words]
            .into_iter()
            .flatten()
        {
            if path.as_os_str().is_empty() {
                return Err(BiasError::Configuration(
                    "word list path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
