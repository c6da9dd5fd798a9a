//! HTTP request handlers for the wage engine API.
//!
//! Both endpoints are stateless: the caller supplies every input, the
//! configuration only fills in engine settings and branch defaults.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{DayContext, EffectiveShift, calculate_day_wage};
use crate::error::EngineResult;
use crate::models::WageRun;
use crate::wage_run::generate_wage_lines;

use super::request::{DayWageRequest, WageRunPreviewRequest};
use super::response::{ApiError, ApiErrorResponse, WageRunPreview};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/day-wage", post(day_wage_handler))
        .route("/wage-runs/preview", post(wage_run_preview_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Handler for `POST /day-wage`.
async fn day_wage_handler(
    State(state): State<AppState>,
    payload: Result<Json<DayWageRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing day wage request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let branch = request
        .branch
        .as_ref()
        .or_else(|| config.branch(&request.employee.branch));
    let settings = config.settings();

    let start_time = Instant::now();
    let calculation = calculate_day_wage(&DayContext {
        record: &request.record,
        employee: &request.employee,
        shift: EffectiveShift::resolve(&request.employee, branch, &settings.default_shift),
        is_public_holiday: request.is_public_holiday(),
        settings,
        now: request.now.unwrap_or_else(local_now),
    });

    info!(
        correlation_id = %correlation_id,
        employee_id = %calculation.employee_id,
        record_id = %calculation.record_id,
        total_hours = %calculation.result.total_hours,
        total_wage = %calculation.result.total_wage,
        duration_us = start_time.elapsed().as_micros(),
        "Day wage calculated"
    );

    json_response(StatusCode::OK, calculation)
}

/// Handler for `POST /wage-runs/preview`.
async fn wage_run_preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<WageRunPreviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing wage run preview request");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let period = &body.request.period;
    if period.end_date < period.start_date {
        warn!(
            correlation_id = %correlation_id,
            start_date = %period.start_date,
            end_date = %period.end_date,
            "Pay period ends before it starts"
        );
        return error_response(ApiErrorResponse::unprocessable(ApiError::validation_error(
            "pay period end_date is before start_date",
        )));
    }

    let config = state.config();
    let now = body.now.unwrap_or_else(local_now);
    let (request, snapshot, incentives) = body.into_parts(config.branches());

    let start_time = Instant::now();
    let outcome = generate_wage_lines(&request, &snapshot, config.settings(), now);

    let build = || -> EngineResult<WageRun> {
        let mut run = WageRun::new_draft(request.period.clone());
        run.regenerate(outcome.lines)?;
        run.set_gas_total(incentives.gas_total)?;
        run.set_washing_fee(incentives.washing_fee)?;
        run.set_supervisor_fee(incentives.supervisor_fee)?;
        Ok(run)
    };

    match build() {
        Ok(run) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run.id(),
                lines = run.lines().len(),
                warnings = outcome.warnings.len(),
                grand_total = %run.grand_total(),
                duration_us = start_time.elapsed().as_micros(),
                "Wage run preview generated"
            );
            json_response(StatusCode::OK, WageRunPreview::new(run, outcome.warnings))
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Wage run preview failed");
            error_response(err.into())
        }
    }
}
