//! Position-by-position shape graphs of fixed-width records.
//!
//! A [`Graph`] starts out as the literal characters of one record. Conflating
//! graphs widens each position just enough to accept every record seen so
//! far, and [`Graph::distance`] scores how well a record fits such a pattern.

mod cell;
mod scoring;

pub use cell::{Cell, merge_cell};
pub use scoring::{ScoringWeights, WeightsError};

use crate::domain::{CharClass, GraphError};
use scoring::{Aligned, position_cost};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Graph {
    cells: Vec<Cell>,
}

impl Graph {
    /// One literal cell per character. The empty string gives an empty graph.
    pub fn new(s: &str) -> Self {
        s.chars().map(Cell::Literal).collect()
    }

    /// Like [`Graph::new`], with a missing record standing in as one space.
    pub fn from_optional(s: Option<&str>) -> Self {
        match s {
            Some(s) => Self::new(s),
            None => Self {
                cells: vec![Cell::PAD],
            },
        }
    }

    /// A fuzzy graph with one class cell per entry.
    pub fn from_classes<I>(classes: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = CharClass>,
    {
        classes
            .into_iter()
            .map(|class| {
                if class.is_empty() {
                    Err(GraphError::InvalidClassBits(class.bits()))
                } else {
                    Ok(Cell::Class(class))
                }
            })
            .collect()
    }

    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        cells.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// True when no position has been widened into a class.
    pub fn is_literal(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_class())
    }

    /// Widen `self` in place so it also accepts `other`.
    ///
    /// The shorter side is padded with spaces, so a template that has only
    /// seen long records learns that short ones may end in blanks.
    pub fn conflate(&mut self, other: &Graph) {
        if other.len() > self.len() {
            self.cells.resize(other.len(), Cell::PAD);
        }
        let padded_other = other.cells.iter().copied().chain(iter::repeat(Cell::PAD));
        for (cell, theirs) in self.cells.iter_mut().zip(padded_other) {
            *cell = merge_cell(*cell, theirs);
        }
    }

    /// Non-mutating form of [`Graph::conflate`].
    #[must_use]
    pub fn conflated(&self, other: &Graph) -> Graph {
        let mut merged = self.clone();
        merged.conflate(other);
        merged
    }

    /// Score `other` against `self` as the pattern, with the default weights.
    ///
    /// Not symmetric: a class cell in `self` is judged by how many of its
    /// classes `other` exercises, while a class cell in `other` facing a
    /// literal in `self` is simply a literal mismatch.
    pub fn distance(&self, other: &Graph) -> f64 {
        self.distance_with(other, &ScoringWeights::default())
    }

    pub fn distance_with(&self, other: &Graph, weights: &ScoringWeights) -> f64 {
        self.aligned(other)
            .map(|(pattern, observed)| position_cost(pattern, observed, weights))
            .sum()
    }

    /// Per-position costs that [`Graph::distance_with`] sums up.
    pub fn position_costs_with(&self, other: &Graph, weights: &ScoringWeights) -> Vec<f64> {
        self.aligned(other)
            .map(|(pattern, observed)| position_cost(pattern, observed, weights))
            .collect()
    }

    fn aligned<'a>(&'a self, other: &'a Graph) -> impl Iterator<Item = (Aligned, Aligned)> + 'a {
        let width = self.len().max(other.len());
        let pad = |cells: &'a [Cell]| {
            cells
                .iter()
                .map(|cell| Aligned::Present(*cell))
                .chain(iter::repeat(Aligned::LengthMismatch))
        };
        pad(&self.cells).zip(pad(&other.cells)).take(width)
    }
}

impl From<&str> for Graph {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<Vec<Cell>> for Graph {
    fn from(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

impl FromIterator<Cell> for Graph {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        assert_eq!(Graph::new("ab").cells(), &[Cell::Literal('a'), Cell::Literal('b')]);
        assert!(Graph::new("").is_empty());
        assert_eq!(Graph::from_optional(None).cells(), &[Cell::Literal(' ')]);
        assert_eq!(Graph::from_optional(Some("x")), Graph::new("x"));
        assert_eq!(
            Graph::from_classes([CharClass::ALPHA, CharClass::DIGIT]).unwrap().to_string(),
            "αℝ"
        );
        assert_eq!(
            Graph::from_classes([CharClass::ALPHA & CharClass::DIGIT]),
            Err(GraphError::InvalidClassBits(0))
        );
    }

    #[test]
    fn test_conflate_grows_with_padding() {
        let mut graph = Graph::new("ab");
        graph.conflate(&Graph::new("abcd"));
        assert_eq!(graph.len(), 4);
        let expected = (CharClass::ALPHA | CharClass::EMPTY).symbol().unwrap();
        assert_eq!(graph.to_string(), format!("ab{expected}{expected}"));

        let mut longer = Graph::new("abcd");
        longer.conflate(&Graph::new("ab"));
        assert_eq!(longer, graph);
    }

    #[test]
    fn test_conflate_with_self_is_noop() {
        let mut graph = Graph::new("A1-9 x");
        let copy = graph.clone();
        graph.conflate(&copy);
        assert_eq!(graph, copy);
        assert!(graph.is_literal());
    }

    #[test]
    fn test_conflated_leaves_receiver_untouched() {
        let graph = Graph::new("a");
        let merged = graph.conflated(&Graph::new("1"));
        assert_eq!(graph, Graph::new("a"));
        assert_eq!(merged.cells(), &[Cell::Class(CharClass::ALPHA | CharClass::DIGIT)]);
        assert!(!merged.is_literal());
    }

    #[test]
    fn test_distance_pads_with_length_mismatch() {
        assert_eq!(Graph::new("").distance(&Graph::new("  ")), 4.0);
        assert_eq!(Graph::new("  ").distance(&Graph::new("")), 10.0);
        assert_eq!(Graph::new("1").distance(&Graph::new("a ")), 7.0);
        assert_eq!(Graph::new("").distance(&Graph::new("")), 0.0);
    }

    #[test]
    fn test_position_costs() {
        let pattern = Graph::from_cells([
            Cell::Literal('a'),
            Cell::Class(CharClass::DIGIT),
            Cell::Class(CharClass::ALPHA),
        ]);
        let costs = pattern.position_costs_with(&Graph::new("a7!x"), &ScoringWeights::default());
        assert_eq!(costs, vec![0.0, 1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_serde_is_a_cell_list() {
        let graph = Graph::from_cells([Cell::Literal('a'), Cell::Class(CharClass::DIGIT), Cell::Blank]);
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(json, r#"[{"literal":"a"},{"class":4},"blank"]"#);
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, graph);
    }
}
