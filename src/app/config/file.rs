use super::{ConfigError, LogFormat, LogLevel, OutputFormat};
use crate::graph::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings read from a TOML file.
///
/// Paths and levels only fill in what the command line left unset; the
/// `[scoring]` table replaces the default weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub train_dir: Option<PathBuf>,
    pub test_dir: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
    pub output: Option<OutputFormat>,
    pub retain_examples: Option<bool>,
    pub scoring: Option<ScoringWeights>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}
