use super::config::{LogFormat, LogLevel};
use parking_lot::RwLock;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid directive '{input}': expected target=level")]
    InvalidDirectiveFormat { input: String },

    #[error("Invalid level in directive '{input}'")]
    InvalidLevel { input: String },

    #[error("Logging initialization failed: {details}")]
    InitFailed { details: String },
}

/// A per-target level override, e.g. `fixed_graph::classifier=debug`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDirective {
    pub target: String,
    pub level: LogLevel,
}

impl LogDirective {
    pub fn new(target: impl Into<String>, level: LogLevel) -> Self {
        Self {
            target: target.into(),
            level,
        }
    }

    pub fn parse(directive: &str) -> Result<Self, LoggingError> {
        let Some((target, level)) = directive.split_once('=') else {
            return Err(LoggingError::InvalidDirectiveFormat {
                input: directive.to_string(),
            });
        };
        let target = target.trim();
        if target.is_empty() || level.contains('=') {
            return Err(LoggingError::InvalidDirectiveFormat {
                input: directive.to_string(),
            });
        }
        let level = LogLevel::from_str(level).map_err(|_| LoggingError::InvalidLevel {
            input: directive.to_string(),
        })?;
        Ok(Self::new(target, level))
    }

    pub fn to_filter_string(&self) -> String {
        format!("{}={}", self.target, self.level.as_str())
    }
}

pub struct LoggingSystem {
    directives: Arc<RwLock<Vec<LogDirective>>>,
}

impl LoggingSystem {
    pub fn new() -> Self {
        Self {
            directives: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add_directive(&self, directive: &str) -> Result<(), LoggingError> {
        let directive = LogDirective::parse(directive)?;
        self.directives.write().push(directive);
        Ok(())
    }

    pub fn build_filter_string(&self, default_level: LogLevel) -> String {
        let directives = self.directives.read();
        let mut parts = Vec::with_capacity(directives.len() + 1);
        parts.push(default_level.as_str().to_string());
        parts.extend(directives.iter().map(LogDirective::to_filter_string));
        parts.join(",")
    }

    pub fn initialize_tracing(&self, default_level: LogLevel, format: LogFormat) -> Result<(), LoggingError> {
        let filter_string = self.build_filter_string(default_level);
        let env_filter = EnvFilter::try_new(&filter_string).map_err(|e| LoggingError::InitFailed {
            details: format!("Failed to create EnvFilter with '{filter_string}': {e}"),
        })?;

        let (text_layer, json_layer) = match format {
            LogFormat::Text => (
                Some(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .compact(),
                ),
                None,
            ),
            LogFormat::Json => (
                None,
                Some(fmt::layer().with_writer(std::io::stderr).json()),
            ),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(text_layer)
            .with(json_layer)
            .try_init()
            .map_err(|e| LoggingError::InitFailed {
                details: format!("Failed to set global tracing subscriber: {e}"),
            })
    }

    pub fn directive_count(&self) -> usize {
        self.directives.read().len()
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Install the global subscriber once; later calls report the first outcome.
pub fn setup_logging(level: LogLevel, format: LogFormat) -> Result<(), LoggingError> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    let outcome = INIT.get_or_init(|| {
        let logging_system = LoggingSystem::new();
        if let Ok(extra) = std::env::var("FIXED_GRAPH_LOG") {
            for directive in extra.split(',').filter(|d| !d.trim().is_empty()) {
                if let Err(e) = logging_system.add_directive(directive) {
                    eprintln!("Warning: {e}, skipping directive");
                }
            }
        }
        logging_system
            .initialize_tracing(level, format)
            .map_err(|e| e.to_string())
    });

    outcome
        .clone()
        .map_err(|details| LoggingError::InitFailed { details })
}
