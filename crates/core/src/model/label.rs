use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("option index {0} is out of range (expected 0-3)")]
    OutOfRange(usize),
}

//
// ─── OPTION LABEL ─────────────────────────────────────────────────────────────
//

/// Position label of an answer option.
///
/// Labels are position-significant: `A` is always the first option, `D` the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// All labels in display order.
    pub const ALL: [OptionLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Converts a 0-based option index to its label.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::OutOfRange` if `index > 3`.
    pub fn from_index(index: usize) -> Result<Self, LabelError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(LabelError::OutOfRange(index))
    }

    /// Parses a label letter, ignoring case. Anything outside `A-D` yields `None`.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    /// 0-based index of the option this label names.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_conversion_works() {
        assert_eq!(OptionLabel::from_index(0).unwrap(), OptionLabel::A);
        assert_eq!(OptionLabel::from_index(3).unwrap(), OptionLabel::D);
        let err = OptionLabel::from_index(4).unwrap_err();
        assert!(matches!(err, LabelError::OutOfRange(4)));
    }

    #[test]
    fn char_parsing_is_case_insensitive() {
        assert_eq!(OptionLabel::from_char('b'), Some(OptionLabel::B));
        assert_eq!(OptionLabel::from_char('D'), Some(OptionLabel::D));
        assert_eq!(OptionLabel::from_char('E'), None);
        assert_eq!(OptionLabel::from_char(' '), None);
    }

    #[test]
    fn index_and_char_agree() {
        for (i, label) in OptionLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(OptionLabel::from_char(label.as_char()), Some(*label));
        }
        assert_eq!(OptionLabel::C.to_string(), "C");
    }
}
