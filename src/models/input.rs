//! Calculation input model.
//!
//! This module defines [`CalculationOptions`], the elective flags and raw
//! relief inputs that accompany a gross annual income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_taxpayer_category() -> String {
    "regular-employee".to_string()
}

fn default_income_type() -> String {
    "salary".to_string()
}

/// Elective options and raw relief inputs for a single calculation.
///
/// Missing fields take the same defaults as the calculator form: pension and
/// housing fund contributions are included, every relief input is zero.
///
/// `taxpayer_category` and `income_type` are carried through for display
/// and never affect the arithmetic.
///
/// # Example
///
/// ```
/// use paye_engine::models::CalculationOptions;
/// use rust_decimal_macros::dec;
///
/// let options: CalculationOptions = serde_json::from_str(r#"{
///     "annual_rent": "1200000",
///     "dependents": 2
/// }"#).unwrap();
///
/// assert!(options.include_pension);
/// assert!(options.include_housing_fund);
/// assert_eq!(options.annual_rent, dec!(1200000));
/// assert_eq!(options.dependents, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationOptions {
    /// Whether the employee pension contribution is deducted.
    #[serde(default = "default_true")]
    pub include_pension: bool,
    /// Whether the housing fund contribution is deducted.
    #[serde(default = "default_true")]
    pub include_housing_fund: bool,
    /// Annual rent paid.
    #[serde(default)]
    pub annual_rent: Decimal,
    /// Annual life assurance premium paid.
    #[serde(default)]
    pub life_assurance_premium: Decimal,
    /// Number of dependents claimed.
    #[serde(default)]
    pub dependents: u32,
    /// Whether the taxpayer has a disability.
    #[serde(default)]
    pub has_disability: bool,
    /// Taxpayer category, informational.
    #[serde(default = "default_taxpayer_category")]
    pub taxpayer_category: String,
    /// Income type, informational.
    #[serde(default = "default_income_type")]
    pub income_type: String,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            include_pension: true,
            include_housing_fund: true,
            annual_rent: Decimal::ZERO,
            life_assurance_premium: Decimal::ZERO,
            dependents: 0,
            has_disability: false,
            taxpayer_category: default_taxpayer_category(),
            income_type: default_income_type(),
        }
    }
}

impl CalculationOptions {
    /// Options with no elective contributions and no reliefs claimed.
    pub fn bare() -> Self {
        Self {
            include_pension: false,
            include_housing_fund: false,
            ..Self::default()
        }
    }
}
