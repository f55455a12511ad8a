//! Error types for slide deck parsing and rendering.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur at the core's entry points.
#[derive(Error, Debug)]
pub enum Error {
    /// The input text is not valid JSON.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The slide description did not validate against the document grammar.
    #[error("{0}")]
    Validation(ValidationReport),
}

/// A single structural problem found while validating a slide description.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The discriminator is not legal at this grammar position.
    #[error("Type {0} is incorrect.")]
    Type(String),

    /// A required attribute is missing or malformed.
    #[error("Attribute {0} is incorrect.")]
    Attribute(&'static str),

    /// The `content` field is missing or has the wrong shape.
    #[error("Content of {0} is incorrect.")]
    Content(&'static str),
}

/// Every violation collected during a parse, in document order.
///
/// Serializes as `{"success": false, "errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Always false; present so the report serializes in its wire shape.
    pub success: bool,

    /// Rendered violation messages.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Build a report from collected violations.
    pub fn new(violations: &[Violation]) -> Self {
        Self {
            success: false,
            errors: violations.iter().map(ToString::to_string).collect(),
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {}", self.errors.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            Violation::Type("slides".to_string()).to_string(),
            "Type slides is incorrect."
        );
        assert_eq!(
            Violation::Attribute("level").to_string(),
            "Attribute level is incorrect."
        );
        assert_eq!(
            Violation::Content("bold").to_string(),
            "Content of bold is incorrect."
        );
    }

    #[test]
    fn test_error_display() {
        let json_error = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let errors = [
            Error::from(json_error),
            Error::Validation(ValidationReport::new(&[Violation::Attribute("level")])),
        ];

        let messages: Vec<String> = errors
            .iter()
            .map(|error| match error {
                Error::JsonError(_) => "json".to_string(),
                Error::Validation(report) => report.to_string(),
            })
            .collect();
        assert_eq!(
            messages,
            vec!["json", "Validation failed: Attribute level is incorrect."]
        );
        assert!(errors[0].to_string().starts_with("JSON parsing error: "));
    }

    #[test]
    fn test_report_wire_shape() {
        let report = ValidationReport::new(&[Violation::Type("foo".to_string())]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "success": false, "errors": ["Type foo is incorrect."] })
        );
    }
}
