//! Widget configuration
//!
//! Describes the markup markers used to discover digit groups. The defaults
//! match the markup rendered by [`crate::field::NumericField`].

use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};

/// Attribute set on an aggregate field once its group is wired
///
/// Discovery skips marked fields, so attaching twice never doubles listeners.
pub const BOUND_ATTRIBUTE: &str = "data-otp-bound";

/// Markup markers used during discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Attribute that tags both the aggregate field and the digit slots
    pub type_attribute: String,
    /// Attribute value marking the aggregate field
    pub aggregate_type: String,
    /// Attribute value marking a digit slot
    pub digit_type: String,
    /// Class of the element holding the digit slots
    pub digits_container_class: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            type_attribute: "data-custom-type".to_string(),
            aggregate_type: "numeric".to_string(),
            digit_type: "numeric-digit".to_string(),
            digits_container_class: "input-field-numeric-digits".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document; missing keys keep their defaults
    pub fn from_json(json: &str) -> WidgetResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WidgetError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the tagging attribute
    #[must_use]
    pub fn with_type_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.type_attribute = attribute.into();
        self
    }

    /// Set the aggregate field marker
    #[must_use]
    pub fn with_aggregate_type(mut self, value: impl Into<String>) -> Self {
        self.aggregate_type = value.into();
        self
    }

    /// Set the digit slot marker
    #[must_use]
    pub fn with_digit_type(mut self, value: impl Into<String>) -> Self {
        self.digit_type = value.into();
        self
    }

    /// Set the digit container class
    #[must_use]
    pub fn with_digits_container_class(mut self, class: impl Into<String>) -> Self {
        self.digits_container_class = class.into();
        self
    }

    /// Rejects empty markers
    pub fn validate(&self) -> WidgetResult<()> {
        let fields = [
            ("type_attribute", &self.type_attribute),
            ("aggregate_type", &self.aggregate_type),
            ("digit_type", &self.digit_type),
            ("digits_container_class", &self.digits_container_class),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(WidgetError::config(format!("{name} must not be empty")));
            }
        }
        if self.aggregate_type == self.digit_type {
            return Err(WidgetError::config(
                "aggregate_type and digit_type must differ",
            ));
        }
        Ok(())
    }

    /// CSS selector for aggregate fields
    #[must_use]
    pub fn aggregate_selector(&self) -> String {
        format!(r#"input[{}="{}"]"#, self.type_attribute, self.aggregate_type)
    }

    /// CSS selector for digit slots
    #[must_use]
    pub fn digit_selector(&self) -> String {
        format!(r#"input[{}="{}"]"#, self.type_attribute, self.digit_type)
    }

    /// CSS selector for the digit container
    #[must_use]
    pub fn container_selector(&self) -> String {
        format!(".{}", self.digits_container_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors() {
        let config = WidgetConfig::default();
        assert_eq!(
            config.aggregate_selector(),
            r#"input[data-custom-type="numeric"]"#
        );
        assert_eq!(
            config.digit_selector(),
            r#"input[data-custom-type="numeric-digit"]"#
        );
        assert_eq!(config.container_selector(), ".input-field-numeric-digits");
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(WidgetConfig::new(), WidgetConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = WidgetConfig::new()
            .with_type_attribute("data-kind")
            .with_aggregate_type("otp")
            .with_digit_type("otp-digit")
            .with_digits_container_class("otp-digits");
        assert_eq!(config.aggregate_selector(), r#"input[data-kind="otp"]"#);
        assert_eq!(config.digit_selector(), r#"input[data-kind="otp-digit"]"#);
        assert_eq!(config.container_selector(), ".otp-digits");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = WidgetConfig::from_json(r#"{"digit_type": "pin-digit"}"#).unwrap();
        assert_eq!(config.digit_type, "pin-digit");
        assert_eq!(config.aggregate_type, "numeric");
    }

    #[test]
    fn test_from_json_empty_object() {
        assert_eq!(
            WidgetConfig::from_json("{}").unwrap(),
            WidgetConfig::default()
        );
    }

    #[test]
    fn test_from_json_malformed() {
        let err = WidgetConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, WidgetError::Config { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_marker() {
        let err = WidgetConfig::from_json(r#"{"digits_container_class": " "}"#).unwrap_err();
        assert!(err.to_string().contains("digits_container_class"));
    }

    #[test]
    fn test_validate_rejects_identical_markers() {
        let config = WidgetConfig::new().with_digit_type("numeric");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = WidgetConfig::new().with_aggregate_type("code");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(WidgetConfig::from_json(&json).unwrap(), config);
    }
}
