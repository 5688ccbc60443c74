//! Request types for the PAYE engine API.
//!
//! This module defines the JSON request structure for the `/calculate` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationOptions, Period};

/// Request body for the `/calculate` endpoint.
///
/// `gross_income` is expressed in `period` terms; it is converted to an
/// annual figure before the engine sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Gross income for one period.
    pub gross_income: Decimal,
    /// The period `gross_income` is expressed in.
    #[serde(default)]
    pub period: Period,
    /// Elective options and relief inputs.
    #[serde(default)]
    pub options: CalculationOptions,
}

impl CalculationRequest {
    /// Returns the gross income as an annual amount.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if any monetary field is
    /// negative, or if the gross income overflows when annualized.
    pub fn gross_annual(&self) -> EngineResult<Decimal> {
        let monetary = [
            ("gross_income", self.gross_income),
            ("options.annual_rent", self.options.annual_rent),
            (
                "options.life_assurance_premium",
                self.options.life_assurance_premium,
            ),
        ];
        for (field, value) in monetary {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
        }

        self.period
            .to_annual(self.gross_income)
            .ok_or_else(|| EngineError::InvalidInput {
                field: "gross_income".to_string(),
                message: "too large to annualize".to_string(),
            })
    }
}
