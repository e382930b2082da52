//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::{compute_batch, compute_payslip};
use crate::error::EngineError;

use super::request::{BatchCalculationRequest, CalculationRequest};
use super::response::{ApiError, ApiErrorResponse, BracketsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/calculate-batch", post(calculate_batch_handler))
        .route("/brackets", get(brackets_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts one employee record and returns the computed payslip.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let context = request.context();
    let start_time = Instant::now();
    match compute_payslip(&request.employee, &context, state.constants()) {
        Ok(payslip) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %payslip.employee_id,
                period = %payslip.period,
                net_pay = %payslip.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, &payslip)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /calculate-batch endpoint.
///
/// Invalid employees are reported in `failed` and do not fail the request.
async fn calculate_batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let context = request.context();
    let start_time = Instant::now();
    match compute_batch(&request.employees, &context, state.constants()) {
        Ok(outcome) => {
            if !outcome.failed.is_empty() {
                warn!(
                    correlation_id = %correlation_id,
                    failed = outcome.failed.len(),
                    "Some employees failed validation"
                );
            }
            info!(
                correlation_id = %correlation_id,
                period = %context.period,
                employees = request.employees.len(),
                succeeded = outcome.succeeded.len(),
                failed = outcome.failed.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Batch calculation completed"
            );
            json_response(StatusCode::OK, &outcome)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for GET /brackets endpoint.
///
/// Returns the income tax brackets and seniority tiers in use.
async fn brackets_handler(State(state): State<AppState>) -> Response {
    let body = BracketsResponse::from(state.constants());
    json_response(StatusCode::OK, &body)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    if err.is_configuration_error() {
        error!(
            correlation_id = %correlation_id,
            error = %err,
            "Statutory constants table is malformed"
        );
    } else {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Calculation rejected"
        );
    }
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Contains the detailed serde error
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, &error)
}
