use super::Cell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cost of each kind of positional disagreement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// A literal template cell facing anything other than the same character.
    pub literal_mismatch: f64,
    /// One side has no cell at this position.
    pub length_mismatch: f64,
    /// A fuzzy template cell that matched.
    pub fuzzy_match: f64,
    /// Added per template class that the candidate did not exercise.
    pub fuzzy_swing_miss: f64,
    /// A fuzzy template cell with no class in common with the candidate.
    pub fuzzy_strikeout: f64,
}

impl ScoringWeights {
    pub const LITERAL_MISMATCH: f64 = 5.0;
    pub const LENGTH_MISMATCH: f64 = 2.0;
    pub const FUZZY_MATCH: f64 = 1.0;
    pub const FUZZY_SWING_MISS: f64 = 0.25;
    pub const FUZZY_STRIKEOUT: f64 = Self::FUZZY_MATCH * 3.0;

    pub fn validate(&self) -> Result<(), WeightsError> {
        let fields = [
            ("literal_mismatch", self.literal_mismatch),
            ("length_mismatch", self.length_mismatch),
            ("fuzzy_match", self.fuzzy_match),
            ("fuzzy_swing_miss", self.fuzzy_swing_miss),
            ("fuzzy_strikeout", self.fuzzy_strikeout),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError { name, value });
            }
        }
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            literal_mismatch: Self::LITERAL_MISMATCH,
            length_mismatch: Self::LENGTH_MISMATCH,
            fuzzy_match: Self::FUZZY_MATCH,
            fuzzy_swing_miss: Self::FUZZY_SWING_MISS,
            fuzzy_strikeout: Self::FUZZY_STRIKEOUT,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Scoring weight '{name}' must be finite and non-negative, got {value}")]
pub struct WeightsError {
    pub name: &'static str,
    pub value: f64,
}

/// A position of the padded working copy used while scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Aligned {
    Present(Cell),
    LengthMismatch,
}

impl Aligned {
    /// A blank cell scores as the space it stands for.
    fn normalized(self) -> Self {
        match self {
            Aligned::Present(Cell::Blank) => Aligned::Present(Cell::PAD),
            other => other,
        }
    }
}

/// Cost of comparing the template cell `pattern` with the observed cell.
pub(crate) fn position_cost(pattern: Aligned, observed: Aligned, weights: &ScoringWeights) -> f64 {
    match (pattern.normalized(), observed.normalized()) {
        (Aligned::Present(Cell::Literal(p)), Aligned::Present(Cell::Literal(o))) if p == o => 0.0,
        (Aligned::Present(Cell::Literal(_)), _) => weights.literal_mismatch,
        (Aligned::LengthMismatch, _) | (_, Aligned::LengthMismatch) => weights.length_mismatch,
        (Aligned::Present(pattern), Aligned::Present(observed)) => {
            let swings = pattern.encode();
            let common = swings & observed.encode();
            if common.is_empty() {
                return weights.fuzzy_strikeout;
            }
            let misses = swings.count() - common.count();
            weights.fuzzy_match + f64::from(misses) * weights.fuzzy_swing_miss
        }
    }
}
