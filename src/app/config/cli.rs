use super::file::FileConfig;
use super::{ConfigError, LogFormat, LogLevel, OutputFormat};
use crate::graph::ScoringWeights;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Directory holding one sub-directory of training records per label
    #[arg(long, env = "FIXED_GRAPH_TRAIN_DIR")]
    pub train_dir: Option<PathBuf>,

    /// Directory of labeled records to evaluate the trained classifier on
    #[arg(long, env = "FIXED_GRAPH_TEST_DIR")]
    pub test_dir: Option<PathBuf>,

    /// Record files to classify
    pub inputs: Vec<PathBuf>,

    /// Print every learned template
    #[arg(long)]
    pub show_templates: bool,

    /// Exit with an error when evaluation misclassifies any record
    #[arg(long)]
    pub fail_on_miss: bool,

    /// Discard raw training records once they are conflated
    #[arg(long)]
    pub drop_examples: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log line format
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Result output format
    #[arg(long, env = "OUTPUT_FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Configuration file path (optional)
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Distance weights (config file only)
    #[serde(skip)]
    #[arg(skip)]
    pub scoring: ScoringWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            train_dir: None,
            test_dir: None,
            inputs: Vec::new(),
            show_templates: false,
            fail_on_miss: false,
            drop_examples: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Text,
            output: OutputFormat::Text,
            config_file: None,
            scoring: ScoringWeights::default(),
        }
    }
}

/// Defaulted options that were set on the command line or through the
/// environment. The config file never overrides these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitArgs {
    pub log_level: bool,
    pub log_format: bool,
    pub output: bool,
}

impl ExplicitArgs {
    fn from_matches(matches: &ArgMatches) -> Self {
        let explicit = |id: &str| {
            matches
                .value_source(id)
                .is_some_and(|source| source != ValueSource::DefaultValue)
        };
        Self {
            log_level: explicit("log_level"),
            log_format: explicit("log_format"),
            output: explicit("output"),
        }
    }
}

impl Config {
    /// Parse arguments (with environment fallbacks), overlay the config file
    /// if one was named, then validate.
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let parsed = Config::command()
            .try_get_matches_from(args)
            .and_then(|matches| Config::from_arg_matches(&matches).map(|config| (config, matches)));
        let (mut config, matches) = match parsed {
            Ok(parsed) => parsed,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => return Err(ConfigError::InvalidConfig(e.to_string())),
        };
        if let Some(path) = config.config_file.clone() {
            config.apply_file(&path, ExplicitArgs::from_matches(&matches))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn apply_file(&mut self, path: &Path, explicit: ExplicitArgs) -> Result<(), ConfigError> {
        let file = FileConfig::from_file(path)?;
        self.merge(file, explicit);
        Ok(())
    }

    /// Fill unset paths from `file` and take its scoring table.
    ///
    /// Levels and formats from the file replace only values in `self` that
    /// came from clap defaults.
    pub fn merge(&mut self, file: FileConfig, explicit: ExplicitArgs) {
        if self.train_dir.is_none() {
            self.train_dir = file.train_dir;
        }
        if self.test_dir.is_none() {
            self.test_dir = file.test_dir;
        }
        if let Some(level) = file.log_level.filter(|_| !explicit.log_level) {
            self.log_level = level;
        }
        if let Some(format) = file.log_format.filter(|_| !explicit.log_format) {
            self.log_format = format;
        }
        if let Some(output) = file.output.filter(|_| !explicit.output) {
            self.output = output;
        }
        if file.retain_examples == Some(false) {
            self.drop_examples = true;
        }
        if let Some(scoring) = file.scoring {
            self.scoring = scoring;
        }
    }

    /// Training directory; only valid after [`Config::validate`] succeeded.
    pub fn train_dir(&self) -> Result<&Path, ConfigError> {
        self.train_dir
            .as_deref()
            .ok_or_else(|| ConfigError::InvalidConfig("--train-dir is required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_clap_defaults() {
        let parsed = Config::parse_from(["fixed-graph"]);
        let default = Config::default();
        assert_eq!(parsed.log_level, default.log_level);
        assert_eq!(parsed.log_format, default.log_format);
        assert_eq!(parsed.output, default.output);
        assert!(parsed.inputs.is_empty());
    }

    #[test]
    fn test_merge_fills_only_unset_values() {
        let mut config = Config {
            train_dir: Some(PathBuf::from("/cli/train")),
            log_level: LogLevel::Warn,
            ..Config::default()
        };
        let explicit = ExplicitArgs {
            log_level: true,
            ..ExplicitArgs::default()
        };
        let file = FileConfig {
            train_dir: Some(PathBuf::from("/file/train")),
            test_dir: Some(PathBuf::from("/file/test")),
            log_level: Some(LogLevel::Trace),
            output: Some(OutputFormat::Json),
            retain_examples: Some(false),
            scoring: Some(ScoringWeights {
                literal_mismatch: 9.0,
                ..ScoringWeights::default()
            }),
            ..FileConfig::default()
        };
        config.merge(file, explicit);

        assert_eq!(config.train_dir, Some(PathBuf::from("/cli/train")));
        assert_eq!(config.test_dir, Some(PathBuf::from("/file/test")));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.drop_examples);
        assert_eq!(config.scoring.literal_mismatch, 9.0);
    }

    #[test]
    fn test_explicit_default_value_is_kept() {
        let matches = Config::command()
            .try_get_matches_from(["fixed-graph", "--log-level", "info"])
            .unwrap();
        let explicit = ExplicitArgs::from_matches(&matches);
        assert!(explicit.log_level);
        assert!(!explicit.log_format);
        assert!(!explicit.output);

        let mut config = Config::from_arg_matches(&matches).unwrap();
        config.merge(
            FileConfig {
                log_level: Some(LogLevel::Trace),
                log_format: Some(LogFormat::Json),
                ..FileConfig::default()
            },
            explicit,
        );
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_train_dir_accessor() {
        assert!(Config::default().train_dir().is_err());
    }
}
