//! Keyboard input classification
//!
//! Maps the DOM `KeyboardEvent.key` string onto the small set of keys the
//! digit group reacts to. Everything else is carried as [`Key::Other`] so the
//! handler can suppress it without acting on it.

/// A key the digit group distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Move focus one slot to the left (wrapping)
    ArrowLeft,
    /// Move focus one slot to the right (wrapping)
    ArrowRight,
    /// Clear the rightmost filled slot
    Backspace,
    /// An ASCII decimal digit, `0..=9`
    Digit(u8),
    /// Any other key value
    Other(String),
}

impl Key {
    /// Classifies a DOM `KeyboardEvent.key` value
    ///
    /// Only a single ASCII digit counts as a digit. Whitespace, signs,
    /// multi-character names and non-ASCII numerals are [`Key::Other`].
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Backspace" => Self::Backspace,
            _ => match key.as_bytes() {
                [b @ b'0'..=b'9'] => Self::Digit(b - b'0'),
                _ => Self::Other(key.to_string()),
            },
        }
    }

    /// Returns the character written into a slot for this key
    #[must_use]
    pub fn digit_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(*d), 10),
            _ => None,
        }
    }

    /// Returns the DOM key name for this key
    #[must_use]
    pub fn dom_name(&self) -> String {
        match self {
            Self::ArrowLeft => "ArrowLeft".to_string(),
            Self::ArrowRight => "ArrowRight".to_string(),
            Self::Backspace => "Backspace".to_string(),
            Self::Digit(d) => d.to_string(),
            Self::Other(name) => name.clone(),
        }
    }
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        Self::from_dom_key(key)
    }
}

/// A keydown as seen by a digit slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// The classified key
    pub key: Key,
    /// Whether the control accelerator was held
    pub ctrl: bool,
}

impl KeyInput {
    /// Creates a keydown without modifiers
    #[must_use]
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
        }
    }

    /// Creates a keydown with the control accelerator held
    #[must_use]
    pub fn with_ctrl(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            ctrl: true,
        }
    }
}
