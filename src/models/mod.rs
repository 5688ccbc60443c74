//! Domain models for the PAYE engine.
//!
//! This module contains the calculation input options, the itemized
//! calculation result with its audit trace, and pay period conversion.

mod calculation_result;
mod input;
mod period;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult, ReliefKind};
pub use input::CalculationOptions;
pub use period::{Period, PeriodBreakdown, round_money};
