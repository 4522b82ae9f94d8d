pub mod config;
pub mod logging_system;

pub use config::{
    Config, ConfigError, ExplicitArgs, FileConfig, LogFormat, LogLevel, OutputFormat,
};
pub use logging_system::{LoggingError, LoggingSystem, setup_logging};

use crate::classifier::Classifier;
use crate::corpus::{self, EvaluationReport, LabeledCorpus};
use anyhow::Context;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};

/// A classified input file as printed to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRecord {
    pub path: PathBuf,
    pub label: String,
    pub distance: f64,
}

/// A learned template as printed to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateView {
    pub label: String,
    pub examples: usize,
    pub rendered: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub classified: Vec<ClassifiedRecord>,
    pub report: Option<EvaluationReport>,
}

pub struct App {
    config: Config,
    classifier: Classifier,
}

impl App {
    pub fn from_args<I, T>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::from_args(args)?;
        if let Err(e) = setup_logging(config.log_level, config.log_format) {
            eprintln!("Warning: {e}");
        }
        Self::from_config(config)
    }

    /// Train a classifier from the configured corpus.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let train_dir = config.train_dir()?;
        info!(
            "Starting fixed-graph v{} (train_dir={})",
            crate::VERSION,
            train_dir.display()
        );

        let training = LabeledCorpus::from_dir(train_dir)
            .with_context(|| format!("loading training corpus {}", train_dir.display()))?;
        let mut classifier =
            Classifier::with_weights(config.scoring).retain_examples(!config.drop_examples);
        corpus::train(&mut classifier, &training);

        Ok(Self { config, classifier })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn templates(&self) -> Vec<TemplateView> {
        self.classifier
            .templates()
            .iter()
            .map(|template| TemplateView {
                label: template.label.clone(),
                examples: template.trained,
                rendered: template.graph.to_string(),
            })
            .collect()
    }

    /// Classify the configured inputs and evaluate the test corpus, writing
    /// results to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> anyhow::Result<RunSummary> {
        let json = self.config.output == OutputFormat::Json;

        if self.config.show_templates {
            for view in self.templates() {
                if json {
                    writeln!(out, "{}", serde_json::to_string(&view)?)?;
                } else {
                    writeln!(
                        out,
                        "{} ({} examples)\n{}\n{}\n",
                        view.label,
                        view.examples,
                        "=".repeat(20),
                        view.rendered
                    )?;
                }
            }
        }

        let mut summary = RunSummary::default();
        for path in &self.config.inputs {
            let graph = corpus::load_graph(path)?;
            let result = self.classifier.classify(&graph)?;
            let record = ClassifiedRecord {
                path: path.clone(),
                label: result.label.to_string(),
                distance: result.distance,
            };
            if json {
                writeln!(out, "{}", serde_json::to_string(&record)?)?;
            } else {
                writeln!(out, "{}\t{}\t{}", record.path.display(), record.label, record.distance)?;
            }
            summary.classified.push(record);
        }

        if let Some(test_dir) = &self.config.test_dir {
            let test = LabeledCorpus::from_dir(test_dir)
                .with_context(|| format!("loading test corpus {}", test_dir.display()))?;
            let report = corpus::evaluate(&self.classifier, &test)?;
            if json {
                writeln!(out, "{}", serde_json::to_string(&report)?)?;
            } else {
                writeln!(
                    out,
                    "accuracy: {}/{} ({:.1}%)",
                    report.correct,
                    report.total,
                    report.accuracy() * 100.0
                )?;
                for miss in &report.misses {
                    writeln!(
                        out,
                        "miss\t{}\texpected={}\tpredicted={}\tdistance={}",
                        miss.path.display(),
                        miss.expected,
                        miss.predicted,
                        miss.distance
                    )?;
                }
            }
            if self.config.fail_on_miss && !report.misses.is_empty() {
                anyhow::bail!(
                    "{} of {} test records were misclassified",
                    report.misses.len(),
                    report.total
                );
            }
            summary.report = Some(report);
        }

        Ok(summary)
    }
}

// Main entry point for the binary
pub fn main() -> anyhow::Result<()> {
    let app = App::from_args(std::env::args_os()).inspect_err(|e| {
        error!("Configuration error: {e:#}");
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app.run(&mut out).inspect_err(|e| {
        error!("Application error: {e:#}");
    })?;
    out.flush()?;
    Ok(())
}
