//! Error types for the PAYE engine.
//!
//! The tax computation itself is total over well-formed input and never
//! fails. These errors cover the boundary around it: loading and validating
//! a tax schedule, and rejecting out-of-domain caller input.

use thiserror::Error;

/// The main error type for the PAYE engine.
///
/// # Example
///
/// ```
/// use paye_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/brackets.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/brackets.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The loaded schedule breaks a bracket or rate-table invariant.
    #[error("Invalid tax schedule: {message}")]
    InvalidSchedule {
        /// What was wrong with the schedule.
        message: String,
    },

    /// Caller input was outside the domain the engine accepts.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// Why it was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
