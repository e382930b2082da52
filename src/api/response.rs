//! Response types for the payroll API.
//!
//! This module defines the error response structures, the mapping from
//! engine errors to HTTP statuses, and the `/brackets` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{IncomeTaxBracket, SeniorityTier, StatutoryConstants};
use crate::error::{EngineError, FieldViolation};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Every invalid field, for validation errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            violations: Vec::new(),
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response listing `violations`.
    pub fn validation_error(message: impl Into<String>, violations: Vec<FieldViolation>) -> Self {
        Self {
            violations,
            ..Self::new("VALIDATION_ERROR", message)
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a configuration error response.
    pub fn configuration_error(details: impl Into<String>) -> Self {
        Self::with_details(
            "CONFIGURATION_ERROR",
            "The statutory constants table is malformed",
            details,
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Validation(validation) => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(validation.to_string(), validation.violations),
            },
            other => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::configuration_error(other.to_string()),
            },
        }
    }
}

/// Body of `GET /brackets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BracketsResponse {
    /// Version of the statutory table.
    pub constants_version: String,
    /// Date the figures apply from.
    pub effective_date: NaiveDate,
    /// Monthly income tax brackets.
    pub income_tax_brackets: Vec<IncomeTaxBracket>,
    /// Seniority bonus tiers.
    pub seniority_tiers: Vec<SeniorityTier>,
}

impl From<&StatutoryConstants> for BracketsResponse {
    fn from(constants: &StatutoryConstants) -> Self {
        Self {
            constants_version: constants.metadata.version.clone(),
            effective_date: constants.metadata.effective_date,
            income_tax_brackets: constants.income_tax_brackets.clone(),
            seniority_tiers: constants.seniority_tiers.clone(),
        }
    }
}
