use crate::{catalog::ColumnMapping, Result, RecommenderError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// CSV file holding the listing catalog.
    pub data_path: PathBuf,
    /// Number of recommendations returned per request.
    pub top_n: usize,
    pub columns: ColumnMapping,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("listings.csv"),
            top_n: DEFAULT_TOP_N,
            columns: ColumnMapping::default(),
        }
    }
}

impl RecommenderConfig {
    pub fn new<P: AsRef<Path>>(data_path: P) -> Self {
        Self {
            data_path: data_path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open config {}", path.display()))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .context("Failed to read config contents")?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| RecommenderError::ConfigError(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(RecommenderError::ConfigError(
                "top_n must be a positive integer".to_string(),
            ));
        }
        if self.columns.required().iter().any(|c| c.trim().is_empty()) {
            return Err(RecommenderError::ConfigError(
                "column names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
