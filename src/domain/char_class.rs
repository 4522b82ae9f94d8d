//! Character classes used to describe the shape of a fixed-width record.
//!
//! A class is a set over four base categories packed into the low four bits
//! of a byte. Sets combine with the usual bit operators; every non-empty set
//! has exactly one display glyph.

use super::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};

/// Punctuation recognised as [`CharClass::SPECIAL`].
pub const SPECIAL_CHARS: [char; 10] = ['+', '-', ',', ':', '*', '!', '?', '<', '>', '.'];

/// Characters that count as "nothing here".
pub const EMPTY_CHARS: [char; 3] = [' ', '\r', '\n'];

const DATA_MASK: u8 = 0b1111;

/// Display glyphs indexed by bit pattern. Index 0 (the empty set) has none.
const SYMBOLS: [Option<char>; 16] = [
    None,           // 0b0000
    Some('∅'),      // 0b0001 EMPTY
    Some('α'),      // 0b0010 ALPHA
    Some('∀'),      // 0b0011 ALPHA | EMPTY
    Some('ℝ'),      // 0b0100 DIGIT
    Some('𝕌'),      // 0b0101 DIGIT | EMPTY
    Some('π'),      // 0b0110 ALPHA | DIGIT
    Some('◎'),      // 0b0111 ANY ^ SPECIAL
    Some('¿'),      // 0b1000 SPECIAL
    Some('٭'),      // 0b1001 SPECIAL | EMPTY
    Some('غ'),      // 0b1010 ALPHA | SPECIAL
    Some('◔'),      // 0b1011 ANY ^ DIGIT
    Some('⊕'),      // 0b1100 DIGIT | SPECIAL
    Some('◒'),      // 0b1101 ANY ^ ALPHA
    Some('●'),      // 0b1110 ANY ^ EMPTY
    Some('ω'),      // 0b1111 ANY
];

/// A set of character categories.
///
/// Values built through [`CharClass::from_bits`] or the named constants are
/// always non-empty. `&` and `^` may yield the empty set, which is useful as
/// an intermediate (e.g. "no classes in common") but has no symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CharClass(u8);

impl CharClass {
    /// Whitespace or an absent character.
    pub const EMPTY: CharClass = CharClass(1);
    /// An alphabetic character.
    pub const ALPHA: CharClass = CharClass(2);
    /// A decimal digit.
    pub const DIGIT: CharClass = CharClass(4);
    /// One of [`SPECIAL_CHARS`].
    pub const SPECIAL: CharClass = CharClass(8);
    /// Anything at all, including characters no other class covers.
    pub const ANY: CharClass = CharClass(15);

    /// The four single-bit classes in bit order.
    pub const BASE: [CharClass; 4] = [Self::EMPTY, Self::ALPHA, Self::DIGIT, Self::SPECIAL];

    /// Checked constructor: only `1..=15` name a class.
    pub fn from_bits(bits: u8) -> Result<Self, GraphError> {
        if bits == 0 || bits > DATA_MASK {
            return Err(GraphError::InvalidClassBits(bits));
        }
        Ok(Self(bits))
    }

    /// Classify a single character, `None` meaning "no character".
    pub fn encode(c: Option<char>) -> Self {
        match c {
            None => Self::EMPTY,
            Some(c) if EMPTY_CHARS.contains(&c) => Self::EMPTY,
            Some(c) if c.is_ascii_digit() => Self::DIGIT,
            // Letter numerals such as 'Ⅻ' are alphabetic to std but not letters.
            Some(c) if c.is_alphabetic() && !c.is_numeric() => Self::ALPHA,
            Some(c) if SPECIAL_CHARS.contains(&c) => Self::SPECIAL,
            Some(_) => Self::ANY,
        }
    }

    /// Classify a string holding at most one character.
    pub fn encode_str(s: &str) -> Result<Self, GraphError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (first, None) => Ok(Self::encode(first)),
            _ => Err(GraphError::InvalidInput(s.to_string())),
        }
    }

    /// Display glyph for a raw bit pattern.
    pub fn symbol_for(bits: u8) -> Result<char, GraphError> {
        SYMBOLS
            .get(usize::from(bits))
            .copied()
            .flatten()
            .ok_or(GraphError::UndefinedSymbol(bits))
    }

    /// Display glyph for this class. Fails only for the empty set.
    pub fn symbol(self) -> Result<char, GraphError> {
        Self::symbol_for(self.0)
    }

    /// Inverse of [`CharClass::symbol`].
    pub fn from_symbol(symbol: char) -> Option<Self> {
        SYMBOLS
            .iter()
            .position(|s| *s == Some(symbol))
            .map(|bits| Self(bits as u8))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Number of base categories in the set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every category of `other` is also in `self`.
    #[inline]
    pub const fn contains(self, other: CharClass) -> bool {
        self.0 & other.0 == other.0
    }

    /// The single-bit classes present in this set.
    pub fn base_classes(self) -> impl Iterator<Item = CharClass> {
        Self::BASE.into_iter().filter(move |base| self.contains(*base))
    }
}

impl From<CharClass> for u8 {
    fn from(class: CharClass) -> Self {
        class.0
    }
}

impl TryFrom<u8> for CharClass {
    type Error = GraphError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl From<char> for CharClass {
    fn from(c: char) -> Self {
        Self::encode(Some(c))
    }
}

impl BitOr for CharClass {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self((self.0 | rhs.0) & DATA_MASK)
    }
}

impl BitAnd for CharClass {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0 & DATA_MASK)
    }
}

impl BitXor for CharClass {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self((self.0 ^ rhs.0) & DATA_MASK)
    }
}

impl BitOrAssign for CharClass {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl BitAndAssign for CharClass {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl BitXorAssign for CharClass {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Ok(symbol) => write!(f, "{symbol}"),
            Err(_) => write!(f, "[{}]", self.0),
        }
    }
}

impl fmt::Debug for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 4] = ["EMPTY", "ALPHA", "DIGIT", "SPECIAL"];
        if *self == Self::ANY {
            return f.write_str("CharClass(ANY)");
        }
        let names: Vec<&str> = NAMES
            .iter()
            .zip(Self::BASE)
            .filter(|(_, base)| self.contains(*base))
            .map(|(name, _)| *name)
            .collect();
        if names.is_empty() {
            f.write_str("CharClass(NONE)")
        } else {
            write!(f, "CharClass({})", names.join(" | "))
        }
    }
}
