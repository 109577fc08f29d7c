//! Error types
//!
//! User input never produces one of these: invalid keystrokes and pastes are
//! silently ignored. Errors only come from configuration, from wiring the
//! widget into a page, and from validating a submitted value.

use thiserror::Error;

/// Result type for widget operations
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Errors raised while configuring or attaching the widget
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Configuration could not be parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// The page does not provide what the widget needs
    #[error("Markup error: {message}")]
    Markup {
        /// Error message
        message: String,
    },

    /// A digit group was found with no digit slots
    #[error("Digit group has no digit slots")]
    EmptyGroup,
}

impl WidgetError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a markup error
    #[must_use]
    pub fn markup(message: impl Into<String>) -> Self {
        Self::Markup {
            message: message.into(),
        }
    }
}

/// Reasons a submitted aggregate value is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Value is empty or contains a character other than `0`-`9`
    #[error("Value must contain only digits")]
    NotDigit,

    /// Value has the wrong number of digits
    #[error("Value must be exactly {expected} digits, got {actual}")]
    IncorrectLength {
        /// Required number of digits
        expected: usize,
        /// Number of characters submitted
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = WidgetError::config("bad selector");
        assert_eq!(err.to_string(), "Configuration error: bad selector");
    }

    #[test]
    fn test_markup_error_display() {
        let err = WidgetError::markup("no document");
        assert_eq!(err.to_string(), "Markup error: no document");
    }

    #[test]
    fn test_empty_group_display() {
        assert_eq!(
            WidgetError::EmptyGroup.to_string(),
            "Digit group has no digit slots"
        );
    }

    #[test]
    fn test_field_error_display() {
        assert_eq!(FieldError::NotDigit.to_string(), "Value must contain only digits");
        let err = FieldError::IncorrectLength {
            expected: 6,
            actual: 4,
        };
        assert_eq!(err.to_string(), "Value must be exactly 6 digits, got 4");
    }

    #[test]
    fn test_errors_are_std_errors() {
        let err: Box<dyn std::error::Error> = Box::new(FieldError::NotDigit);
        assert!(err.to_string().contains("digits"));
    }
}
