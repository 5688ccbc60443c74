//! Calculation logic for the PAYE engine.
//!
//! This module contains the progressive bracket tax function, the statutory
//! contribution calculations, the relief capping functions and the
//! take-home engine that combines them.

mod bracket_tax;
mod contributions;
mod engine;
mod reliefs;

pub use bracket_tax::{BandCharge, BracketTaxResult, calculate_bracket_tax, calculate_paye};
pub use contributions::{
    ContributionsResult, calculate_contributions, employer_insurance_contribution,
    housing_fund_contribution, pension_contribution,
};
pub use engine::calculate_take_home;
pub use reliefs::{
    ReliefsResult, apply_relief, calculate_reliefs, dependent_relief, disability_relief,
    life_assurance_relief, relief_enabled, rent_relief,
};
