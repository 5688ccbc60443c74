//! Application state for the PAYE engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::TaxSchedule;

/// Shared application state.
///
/// Holds the tax schedule loaded at startup. It is read-only for the
/// lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    /// The loaded tax schedule.
    schedule: Arc<TaxSchedule>,
}

impl AppState {
    /// Creates a new application state with the given schedule.
    pub fn new(schedule: TaxSchedule) -> Self {
        Self {
            schedule: Arc::new(schedule),
        }
    }

    /// Returns a reference to the tax schedule.
    pub fn schedule(&self) -> &TaxSchedule {
        &self.schedule
    }
}
