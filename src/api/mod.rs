//! HTTP API for the wage engine.
//!
//! - `POST /day-wage` pays a single attendance record.
//! - `POST /wage-runs/preview` generates a draft wage run without storing it.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DayWageRequest, WageRunPreviewRequest};
pub use response::{ApiError, ApiErrorResponse, WageRunPreview};
pub use state::AppState;
