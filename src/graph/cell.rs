use crate::domain::CharClass;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One position of a [`Graph`](super::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    /// A concrete character.
    Literal(char),
    /// A fuzzy placeholder matching any character of the given classes.
    Class(CharClass),
    /// No character at all. Merges as an identity and scores as a space.
    Blank,
}

impl Cell {
    /// The padding cell used when a graph grows: a literal space.
    pub const PAD: Cell = Cell::Literal(' ');

    /// The character class this cell stands for.
    pub fn encode(self) -> CharClass {
        match self {
            Cell::Literal(c) => CharClass::encode(Some(c)),
            Cell::Class(class) => class,
            Cell::Blank => CharClass::encode(None),
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(self, Cell::Literal(_))
    }

    pub fn is_class(self) -> bool {
        matches!(self, Cell::Class(_))
    }
}

impl From<char> for Cell {
    fn from(c: char) -> Self {
        Cell::Literal(c)
    }
}

impl From<CharClass> for Cell {
    fn from(class: CharClass) -> Self {
        Cell::Class(class)
    }
}

impl From<Option<char>> for Cell {
    fn from(c: Option<char>) -> Self {
        c.map_or(Cell::Blank, Cell::Literal)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Literal(c) => write!(f, "{c}"),
            Cell::Class(class) => write!(f, "{class}"),
            Cell::Blank => f.write_str(" "),
        }
    }
}

/// Merge two cells into one that accepts both.
///
/// Equal cells pass through, a blank yields to the other side, and anything
/// else widens to the union of both classes. The result never depends on
/// argument order.
pub fn merge_cell(a: Cell, b: Cell) -> Cell {
    match (a, b) {
        _ if a == b => a,
        (Cell::Blank, other) | (other, Cell::Blank) => other,
        _ => Cell::Class(a.encode() | b.encode()),
    }
}
