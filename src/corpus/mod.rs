//! Loading labeled records from disk and running train/evaluate passes.
//!
//! A corpus directory holds one sub-directory per label; every regular file
//! inside is one record. Labels and files are visited in sorted order so that
//! training and reports are reproducible.

use crate::classifier::Classifier;
use crate::domain::GraphError;
use crate::graph::Graph;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No labeled records found under {0}")]
    Empty(PathBuf),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

impl CorpusError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a whole file as one record.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph, CorpusError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
    Ok(Graph::new(&contents))
}

#[derive(Debug, Clone)]
pub struct LabeledRecord {
    pub label: String,
    pub path: PathBuf,
    pub graph: Graph,
}

#[derive(Debug, Clone, Default)]
pub struct LabeledCorpus {
    root: PathBuf,
    records: Vec<LabeledRecord>,
}

impl LabeledCorpus {
    pub fn from_dir(root: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let root = root.as_ref();
        let mut records = Vec::new();

        for label_dir in sorted_entries(root)? {
            if !label_dir.is_dir() {
                debug!(path = %label_dir.display(), "skipping non-directory at corpus root");
                continue;
            }
            let Some(label) = label_dir.file_name().and_then(|n| n.to_str()) else {
                warn!(path = %label_dir.display(), "skipping label directory with non UTF-8 name");
                continue;
            };
            let label = label.to_string();

            for path in sorted_entries(&label_dir)? {
                if !path.is_file() {
                    continue;
                }
                let graph = load_graph(&path)?;
                records.push(LabeledRecord {
                    label: label.clone(),
                    path,
                    graph,
                });
            }
        }

        if records.is_empty() {
            return Err(CorpusError::Empty(root.to_path_buf()));
        }

        info!(root = %root.display(), records = records.len(), "loaded corpus");
        Ok(Self {
            root: root.to_path_buf(),
            records,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn records(&self) -> &[LabeledRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct labels in visiting order.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for record in &self.records {
            if labels.last() != Some(&record.label.as_str()) {
                labels.push(&record.label);
            }
        }
        labels
    }
}

/// Visible entries of `dir`, sorted by file name.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CorpusError::io(dir, e))? {
        let entry = entry.map_err(|e| CorpusError::io(dir, e))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}

/// Train `classifier` on every record of `corpus`.
pub fn train(classifier: &mut Classifier, corpus: &LabeledCorpus) {
    for record in corpus.records() {
        classifier.train(record.label.clone(), record.graph.clone());
    }
    info!(
        records = corpus.len(),
        labels = classifier.len(),
        "training complete"
    );
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Miss {
    pub path: PathBuf,
    pub expected: String,
    pub predicted: String,
    pub distance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub total: usize,
    pub correct: usize,
    pub misses: Vec<Miss>,
}

impl EvaluationReport {
    /// Fraction of records classified under their own label. 1.0 when empty.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.correct as f64 / self.total as f64
    }
}

/// Classify every record of `corpus` and compare with its directory label.
pub fn evaluate(
    classifier: &Classifier,
    corpus: &LabeledCorpus,
) -> Result<EvaluationReport, CorpusError> {
    let mut report = EvaluationReport::default();
    for record in corpus.records() {
        let result = classifier.classify(&record.graph)?;
        report.total += 1;
        if result.label == record.label {
            report.correct += 1;
        } else {
            warn!(
                path = %record.path.display(),
                expected = %record.label,
                predicted = result.label,
                distance = result.distance,
                "misclassified record"
            );
            report.misses.push(Miss {
                path: record.path.clone(),
                expected: record.label.clone(),
                predicted: result.label.to_string(),
                distance: result.distance,
            });
        }
    }
    info!(
        total = report.total,
        correct = report.correct,
        accuracy = report.accuracy(),
        "evaluation complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, label: &str, name: &str, contents: &str) {
        let dir = root.join(label);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_from_dir_sorts_and_skips_hidden() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "b", "2.txt", "B2");
        write(temp.path(), "b", "1.txt", "B1");
        write(temp.path(), "a", "1.txt", "A1");
        write(temp.path(), "a", ".hidden", "zzz");
        write(temp.path(), ".git", "x", "ignored");
        fs::write(temp.path().join("README"), "not a label").unwrap();

        let corpus = LabeledCorpus::from_dir(temp.path()).unwrap();
        let seen: Vec<String> = corpus.records().iter().map(|r| r.graph.to_string()).collect();
        assert_eq!(seen, vec!["A1", "B1", "B2"]);
        assert_eq!(corpus.labels(), vec!["a", "b"]);
        assert_eq!(corpus.root(), temp.path());
    }

    #[test]
    fn test_empty_corpus() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("label")).unwrap();
        assert!(matches!(
            LabeledCorpus::from_dir(temp.path()),
            Err(CorpusError::Empty(_))
        ));
    }

    #[test]
    fn test_missing_dir() {
        let temp = TempDir::new().unwrap();
        let err = LabeledCorpus::from_dir(temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }

    #[test]
    fn test_load_graph_keeps_newlines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("record");
        fs::write(&path, "AB 12\n").unwrap();
        let graph = load_graph(&path).unwrap();
        assert_eq!(graph.len(), 6);
        assert_eq!(graph, Graph::new("AB 12\n"));
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(EvaluationReport::default().accuracy(), 1.0);
        let report = EvaluationReport {
            total: 4,
            correct: 3,
            misses: Vec::new(),
        };
        assert_eq!(report.accuracy(), 0.75);
    }
}
