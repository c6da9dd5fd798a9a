//! Response types for the wage engine API.
//!
//! This module defines the preview body returned for a generated wage run,
//! the error body shared by every endpoint, and the mapping from
//! [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AuditWarning, IncentiveSettings, WageRun, WageRunLine, WageRunStatus};

/// Body returned by `POST /wage-runs/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WageRunPreview {
    /// Identifier of the unsaved draft.
    pub run_id: Uuid,
    /// Always `draft`: nothing is stored.
    pub status: WageRunStatus,
    /// One line per employee.
    pub lines: Vec<WageRunLine>,
    /// Data integrity warnings found while generating.
    pub warnings: Vec<AuditWarning>,
    /// Incentive settings applied to the lines.
    pub incentives: IncentiveSettings,
    /// Sum of every line's net pay.
    pub grand_total: Decimal,
}

impl WageRunPreview {
    /// Builds the preview body from a draft and its generation warnings.
    pub fn new(run: WageRun, warnings: Vec<AuditWarning>) -> Self {
        Self {
            run_id: run.id(),
            status: run.status(),
            grand_total: run.grand_total(),
            incentives: run.incentives().clone(),
            lines: run.into_lines(),
            warnings,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A 422 response.
    pub fn unprocessable(error: ApiError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::LineNotFound { employee_id } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "LINE_NOT_FOUND",
                    message,
                    format!("No line exists for employee '{}'", employee_id),
                ),
            ),
            EngineError::AmbiguousLine { employee_id, .. } => ApiErrorResponse::unprocessable(
                ApiError::with_details("AMBIGUOUS_LINE", message, employee_id),
            ),
            EngineError::InvalidAdjustment { field, .. } => ApiErrorResponse::unprocessable(
                ApiError::with_details("INVALID_ADJUSTMENT", message, field),
            ),
            EngineError::EmptyWageRun { .. } => {
                ApiErrorResponse::unprocessable(ApiError::new("EMPTY_WAGE_RUN", message))
            }
            EngineError::WageRunFinalized { .. } => {
                ApiErrorResponse::unprocessable(ApiError::new("WAGE_RUN_FINALIZED", message))
            }
            EngineError::ProvisionalAttendance { employee_id } => ApiErrorResponse::unprocessable(
                ApiError::with_details("PROVISIONAL_ATTENDANCE", message, employee_id),
            ),
        }
    }
}
