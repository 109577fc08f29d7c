//! Numeric field markup and submitted-value validation
//!
//! [`NumericField`] renders the markup the controller discovers (a hidden
//! aggregate input followed by a container of digit inputs) and validates
//! the aggregate value once the form is submitted.

use crate::config::WidgetConfig;
use crate::error::FieldError;

/// A segmented numeric form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericField {
    /// Form field name; digit inputs are named `{name}-{index}`
    pub name: String,
    /// Visible label text
    pub label: String,
    /// Number of digit slots
    pub digits_count: usize,
}

impl NumericField {
    /// Creates a field
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, digits_count: usize) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            digits_count,
        }
    }

    /// Id and name of the digit input at `index`
    #[must_use]
    pub fn digit_id(&self, index: usize) -> String {
        format!("{}-{index}", self.name)
    }

    /// Renders the field with the default markers
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(&WidgetConfig::default())
    }

    /// Renders the field using the markers in `config`
    #[must_use]
    pub fn render_with(&self, config: &WidgetConfig) -> String {
        let name = escape(&self.name);
        let attr = escape(&config.type_attribute);
        let digits: String = (0..self.digits_count)
            .map(|i| {
                let id = escape(&self.digit_id(i));
                format!(
                    r#"<input type="number" {attr}="{}" name="{id}" id="{id}" min="0" max="9" required/>"#,
                    escape(&config.digit_type)
                )
            })
            .collect();

        format!(
            r#"<div class="input-field input-field-numeric"><label for="{name}">{label}</label><input type="hidden" name="{name}" {attr}="{aggregate}"/><div class="{container}">{digits}</div></div>"#,
            label = escape(&self.label),
            aggregate = escape(&config.aggregate_type),
            container = escape(&config.digits_container_class),
        )
    }

    /// Validates a submitted aggregate value, returning the digits
    pub fn check_value(&self, value: &str) -> Result<String, FieldError> {
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(FieldError::NotDigit);
        }
        let actual = value.chars().count();
        if actual != self.digits_count {
            return Err(FieldError::IncorrectLength {
                expected: self.digits_count,
                actual,
            });
        }
        Ok(value.to_string())
    }
}

/// Escapes text for use in HTML content and double-quoted attributes
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
