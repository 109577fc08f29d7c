//! Clipboard payload acceptance
//!
//! A paste fills the group only when the payload is exactly one ASCII digit
//! per slot. Longer numeric strings are rejected, not truncated.

use std::fmt;

/// A clipboard payload accepted for a group of a given size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastePayload {
    digits: Vec<char>,
}

/// Why a payload was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteRejection {
    /// Character count differs from the slot count
    LengthMismatch {
        /// Number of slots in the group
        expected: usize,
        /// Number of characters in the payload
        actual: usize,
    },
    /// A character at this position is not an ASCII digit
    NonDigit {
        /// Zero-based character position
        position: usize,
    },
}

impl fmt::Display for PasteRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} characters, got {actual}")
            }
            Self::NonDigit { position } => write!(f, "non-digit at position {position}"),
        }
    }
}

impl PastePayload {
    /// Checks `text` against a group of `slot_count` slots
    pub fn accept(text: &str, slot_count: usize) -> Result<Self, PasteRejection> {
        let digits: Vec<char> = text.chars().collect();
        if digits.len() != slot_count {
            return Err(PasteRejection::LengthMismatch {
                expected: slot_count,
                actual: digits.len(),
            });
        }
        if let Some(position) = digits.iter().position(|c| !c.is_ascii_digit()) {
            return Err(PasteRejection::NonDigit { position });
        }
        Ok(Self { digits })
    }

    /// The accepted digits, one per slot
    #[must_use]
    pub fn digits(&self) -> &[char] {
        &self.digits
    }

    /// Number of digits in the payload
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether the payload holds no digits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}
