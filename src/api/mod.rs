//! HTTP API module for the PAYE engine.
//!
//! This module provides the REST API endpoints for calculating take-home
//! pay and inspecting the loaded tax schedule.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse, ENGINE_VERSION};
pub use state::AppState;
