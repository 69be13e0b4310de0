//! HTTP request handlers for the payroll engine API.
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
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_payroll;
use crate::error::EngineResult;
use crate::models::{PayrollInput, PayrollResult};
use crate::payslip::format_payslip;

use super::request::PayrollRequest;
use super::response::{ApiError, ApiErrorResponse, TaxYearsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/payslip", post(payslip_handler))
        .route("/tax-years", get(tax_years_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a payroll request and returns the payroll result as JSON.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    match process(&state, payload, correlation_id) {
        Ok(result) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(result),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handler for POST /payslip endpoint.
///
/// Accepts the same request as `/calculate` and returns a plain-text payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    match process(&state, payload, correlation_id) {
        Ok(result) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format_payslip(&result),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handler for GET /tax-years endpoint.
async fn tax_years_handler(State(state): State<AppState>) -> Json<TaxYearsResponse> {
    Json(TaxYearsResponse {
        years: state.config().years(),
    })
}

/// Parses the request body and runs the calculation, logging the outcome.
fn process(
    state: &AppState,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<PayrollResult, ApiErrorResponse> {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return Err(ApiErrorResponse::bad_request(rejection_to_error(
                rejection,
                correlation_id,
            )));
        }
    };

    let employee_id = request.employee_id.clone();
    let input: PayrollInput = request.into();

    let start_time = Instant::now();
    match perform_calculation(state, &input) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                month = input.period.month,
                year = input.period.year,
                net_pay = %result.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            Ok(result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Calculation failed"
            );
            Err(err.into())
        }
    }
}

/// Looks up the tax year table and computes the payroll.
fn perform_calculation(state: &AppState, input: &PayrollInput) -> EngineResult<PayrollResult> {
    let constants = state.config().constants_for(input.period.year)?;
    compute_payroll(input, constants)
}

fn rejection_to_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
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
    }
}
