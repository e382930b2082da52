//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints: `POST /calculate`,
//! `POST /calculate-batch` and `GET /brackets`.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchCalculationRequest, CalculationRequest};
pub use response::{ApiError, ApiErrorResponse, BracketsResponse};
pub use state::AppState;
