//! PAYE take-home pay engine for Nigerian employment income.
//!
//! This crate computes an employee's annual take-home pay under the
//! progressive PAYE schedule of the Nigeria Tax Act 2025. Given a gross
//! annual income and a set of elective options, it itemizes pension and
//! housing fund contributions, rent, life assurance, dependent and
//! disability reliefs, the resulting taxable income and bracket tax, and the
//! final take-home figure, with an audit trace of every step.
//!
//! The tax schedule is plain data: loaded from YAML via
//! [`config::ConfigLoader`] or built from [`config::TaxSchedule::nta_2025`].
//!
//! ```
//! use paye_engine::calculation::calculate_take_home;
//! use paye_engine::config::TaxSchedule;
//! use paye_engine::models::CalculationOptions;
//! use rust_decimal_macros::dec;
//!
//! let schedule = TaxSchedule::nta_2025();
//! let options = CalculationOptions {
//!     annual_rent: dec!(1200000),
//!     ..CalculationOptions::default()
//! };
//! let result = calculate_take_home(dec!(6000000), &options, &schedule);
//!
//! assert_eq!(result.taxable_income, dec!(5280000));
//! assert_eq!(result.take_home, result.gross_annual - result.total_deductions);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
