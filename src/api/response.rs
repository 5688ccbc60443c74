//! Response types for the PAYE engine API.
//!
//! This module defines the success envelope for `/calculate` as well as the
//! error response structures and error handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::calculate_take_home;
use crate::config::TaxSchedule;
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationResult, Period, PeriodBreakdown};

use super::request::CalculationRequest;

/// Version reported in every calculation response.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Response body for a successful calculation.
///
/// `result` is the annual itemized result; `breakdown` restates it in the
/// requested period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique id for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Code of the schedule the result was computed under.
    pub schedule_code: String,
    /// The period of the request.
    pub period: Period,
    /// The annual result.
    pub result: CalculationResult,
    /// The result expressed per period.
    pub breakdown: PeriodBreakdown,
}

impl CalculationResponse {
    /// Runs the engine for a request and wraps the result.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if the request carries a
    /// negative monetary amount.
    pub fn calculate(request: &CalculationRequest, schedule: &TaxSchedule) -> EngineResult<Self> {
        let gross_annual = request.gross_annual()?;
        let result = calculate_take_home(gross_annual, &request.options, schedule);
        let breakdown = PeriodBreakdown::from_result(&result, request.period);

        Ok(Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            schedule_code: schedule.metadata().code.clone(),
            period: request.period,
            result,
            breakdown,
        })
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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid input error response for a rejected field.
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::with_details(
            "INVALID_INPUT",
            format!("Invalid input field '{}': {}", field, message.into()),
            format!("The field '{}' is outside the accepted range", field),
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
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidSchedule { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid tax schedule", message),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::invalid_input(&field, message),
            },
        }
    }
}
