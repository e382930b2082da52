//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Two families matter to callers: [`ValidationError`] for bad employee input,
//! which the caller can fix and resubmit, and [`EngineError::Configuration`]
//! for a malformed statutory table, which no input change will fix.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field that failed input validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// The offending field name (e.g., "base_salary").
    pub field: String,
    /// A description of what is wrong with the field.
    pub message: String,
}

impl FieldViolation {
    /// Creates a new violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Employee input was incomplete or out of domain.
///
/// Lists every violated field so the caller can show a single
/// consolidated message.
///
/// # Example
///
/// ```
/// use moroccan_payroll::error::{FieldViolation, ValidationError};
///
/// let error = ValidationError {
///     employee_id: Some("emp_001".to_string()),
///     violations: vec![
///         FieldViolation::new("base_salary", "must be greater than zero"),
///         FieldViolation::new("number_of_children", "cannot be negative"),
///     ],
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid payroll input for 'emp_001': base_salary: must be greater than zero; \
///      number_of_children: cannot be negative"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error(
    "Invalid payroll input for '{}': {}",
    .employee_id.as_deref().unwrap_or("<unknown>"),
    summarize(.violations)
)]
pub struct ValidationError {
    /// The employee id, when one was supplied.
    pub employee_id: Option<String>,
    /// Every violated field, in the order the checks ran.
    pub violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Joins all violations into one `field: message; ...` string.
    pub fn summary(&self) -> String {
        summarize(&self.violations)
    }

    /// Returns true if `field` is among the violations.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use moroccan_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/constants.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/constants.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The statutory constants table is malformed (gap in a bracket or tier
    /// table, inconsistent ceiling, ...). Retrying with other input cannot help.
    #[error("Statutory configuration error: {message}")]
    Configuration {
        /// A description of the broken invariant.
        message: String,
    },

    /// Employee input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl EngineError {
    /// Shorthand for building a [`EngineError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        EngineError::Configuration {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the statutory table rather than the input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::Configuration { .. }
                | EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_configuration_error_displays_message() {
        let error = EngineError::configuration("no income tax bracket covers 2500.50");
        assert_eq!(
            error.to_string(),
            "Statutory configuration error: no income tax bracket covers 2500.50"
        );
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_validation_error_lists_every_field() {
        let error = ValidationError {
            employee_id: None,
            violations: vec![
                FieldViolation::new("employee_id", "is required"),
                FieldViolation::new("base_salary", "is required"),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Invalid payroll input for '<unknown>': employee_id: is required; base_salary: is required"
        );
        assert!(error.has_field("base_salary"));
        assert!(!error.has_field("seniority_months"));
    }

    #[test]
    fn test_validation_is_not_configuration_error() {
        let error: EngineError = ValidationError {
            employee_id: Some("emp_001".to_string()),
            violations: vec![FieldViolation::new("base_salary", "must be greater than zero")],
        }
        .into();
        assert!(!error.is_configuration_error());
        assert!(error.to_string().contains("emp_001"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
        assert_error::<ValidationError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_validation() -> Result<(), ValidationError> {
            Err(ValidationError {
                employee_id: None,
                violations: vec![],
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_validation()?;
            Ok(())
        }

        assert!(matches!(propagates_error(), Err(EngineError::Validation(_))));
    }
}
