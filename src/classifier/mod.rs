//! Nearest-template classification over conflated graphs.
//!
//! Each label owns one template: the conflation of every example trained
//! under it. A candidate graph is assigned to the label whose template is the
//! shortest distance away.

use crate::domain::GraphError;
use crate::graph::{Graph, ScoringWeights};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A label's learned pattern and, optionally, the examples behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub label: String,
    pub graph: Graph,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Graph>,
    /// Number of examples conflated into `graph`, retained or not.
    pub trained: usize,
}

/// Outcome of [`Classifier::classify`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification<'a> {
    pub label: &'a str,
    pub template: &'a Graph,
    pub distance: f64,
}

/// One row of [`Classifier::rank`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub label: String,
    pub distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ClassifierRepr")]
pub struct Classifier {
    /// Templates in the order their labels were first trained.
    templates: Vec<Template>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    weights: ScoringWeights,
    retain_examples: bool,
}

/// Serialized form of [`Classifier`]; the label index is rebuilt on load.
#[derive(Deserialize)]
struct ClassifierRepr {
    templates: Vec<Template>,
    weights: ScoringWeights,
    retain_examples: bool,
}

impl TryFrom<ClassifierRepr> for Classifier {
    type Error = GraphError;

    fn try_from(repr: ClassifierRepr) -> Result<Self, Self::Error> {
        let mut index = HashMap::with_capacity(repr.templates.len());
        for (slot, template) in repr.templates.iter().enumerate() {
            if index.insert(template.label.clone(), slot).is_some() {
                return Err(GraphError::DuplicateLabel(template.label.clone()));
            }
        }
        Ok(Self {
            templates: repr.templates,
            index,
            weights: repr.weights,
            retain_examples: repr.retain_examples,
        })
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self::with_weights(ScoringWeights::default())
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self {
            templates: Vec::new(),
            index: HashMap::new(),
            weights,
            retain_examples: true,
        }
    }

    /// Keep (the default) or drop raw training graphs after conflation.
    #[must_use]
    pub fn retain_examples(mut self, retain: bool) -> Self {
        self.retain_examples = retain;
        self
    }

    /// Fold `graph` into the template for `label`.
    pub fn train(&mut self, label: impl Into<String>, graph: Graph) {
        let label = label.into();
        let retain = self.retain_examples;

        if let Some(&slot) = self.index.get(&label) {
            let template = &mut self.templates[slot];
            template.graph.conflate(&graph);
            template.trained += 1;
            if retain {
                template.examples.push(graph);
            }
            debug!(
                label = %template.label,
                examples = template.trained,
                width = template.graph.len(),
                "conflated training example"
            );
            return;
        }

        debug!(label = %label, width = graph.len(), "new template");
        let examples = if retain { vec![graph.clone()] } else { Vec::new() };
        self.index.insert(label.clone(), self.templates.len());
        self.templates.push(Template {
            label,
            graph,
            examples,
            trained: 1,
        });
    }

    /// The label whose template is nearest to `graph`.
    ///
    /// Ties go to the label trained first.
    pub fn classify(&self, graph: &Graph) -> Result<Classification<'_>, GraphError> {
        let mut best: Option<Classification<'_>> = None;
        for template in &self.templates {
            let distance = template.graph.distance_with(graph, &self.weights);
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(Classification {
                    label: &template.label,
                    template: &template.graph,
                    distance,
                });
            }
        }

        let best = best.ok_or(GraphError::NoTemplates)?;
        debug!(label = best.label, distance = best.distance, "classified graph");
        Ok(best)
    }

    /// Every label with its distance to `graph`, nearest first.
    pub fn rank(&self, graph: &Graph) -> Result<Vec<Ranking>, GraphError> {
        if self.templates.is_empty() {
            return Err(GraphError::NoTemplates);
        }
        let mut rankings: Vec<Ranking> = self
            .templates
            .iter()
            .map(|template| Ranking {
                label: template.label.clone(),
                distance: template.graph.distance_with(graph, &self.weights),
            })
            .collect();
        // Stable sort keeps insertion order among equal distances.
        rankings.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(rankings)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|template| template.label.as_str())
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn template(&self, label: &str) -> Option<&Graph> {
        self.get(label).map(|template| &template.graph)
    }

    /// Retained training graphs for `label`, in training order.
    pub fn examples(&self, label: &str) -> Option<&[Graph]> {
        self.get(label).map(|template| template.examples.as_slice())
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn get(&self, label: &str) -> Option<&Template> {
        self.index.get(label).map(|&slot| &self.templates[slot])
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
