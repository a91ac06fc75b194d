use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cleaning::CleaningPolicy;
use crate::error::{AnalysisError, Result};
use crate::statistics::MAX_HISTOGRAM_BINS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Parquet,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Parquet => "parquet",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Settings for one analysis run, usually read from a TOML file:
///
/// ```toml
/// input = "tmdb-movies.csv"
/// output_dir = "out"
/// format = "parquet"
/// histogram_bins = 20
///
/// [cleaning]
/// drop_duplicates = true
/// drop_zero_budget_and_revenue = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub histogram_bins: usize,
    pub cleaning: CleaningPolicy,
}

impl AnalysisConfig {
    pub const DEFAULT_INPUT: &'static str = "tmdb-movies.csv";
    pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| AnalysisError::io(path, err))?;
        let config = Self::from_toml_str(&content).map_err(|source| AnalysisError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded analysis configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 || self.histogram_bins > MAX_HISTOGRAM_BINS {
            return Err(AnalysisError::Validation(format!(
                "histogram_bins must be between 1 and {MAX_HISTOGRAM_BINS}, got {}",
                self.histogram_bins
            )));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(Self::DEFAULT_INPUT),
            output_dir: None,
            format: OutputFormat::default(),
            histogram_bins: Self::DEFAULT_HISTOGRAM_BINS,
            cleaning: CleaningPolicy::default(),
        }
    }
}
