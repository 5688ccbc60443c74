//! Pay period conversion.
//!
//! The engine always works in annual terms. This module converts a figure
//! entered for a [`Period`] into an annual amount, and renders an annual
//! [`CalculationResult`] back into that period as a [`PeriodBreakdown`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{CalculationResult, ReliefKind};

/// The period a gross income figure is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// One twelfth of a year.
    #[default]
    Monthly,
    /// A full year.
    Annual,
}

impl Period {
    /// Number of periods in a year.
    pub fn divisor(self) -> Decimal {
        match self {
            Period::Monthly => Decimal::from(12),
            Period::Annual => Decimal::ONE,
        }
    }

    /// Converts an amount in this period into an annual amount.
    ///
    /// Returns `None` if the annual amount does not fit in a `Decimal`.
    ///
    /// # Example
    ///
    /// ```
    /// use paye_engine::models::Period;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Period::Monthly.to_annual(dec!(500000)), Some(dec!(6000000)));
    /// assert_eq!(Period::Annual.to_annual(dec!(500000)), Some(dec!(500000)));
    /// assert_eq!(Period::Monthly.to_annual(rust_decimal::Decimal::MAX), None);
    /// ```
    pub fn to_annual(self, amount: Decimal) -> Option<Decimal> {
        amount.checked_mul(self.divisor())
    }

    /// Converts an annual amount into this period, unrounded.
    pub fn from_annual(self, amount: Decimal) -> Decimal {
        amount / self.divisor()
    }
}

/// Rounds a monetary value to two decimal places, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A result expressed per period, rounded for display.
///
/// Monetary fields are divided by the period divisor and rounded to two
/// decimal places; the effective rate is rounded to one decimal place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    /// The period the figures are expressed in.
    pub period: Period,
    /// Gross income.
    pub gross: Decimal,
    /// Taxable income.
    pub taxable_income: Decimal,
    /// PAYE tax.
    pub paye_tax: Decimal,
    /// Pension contribution.
    pub pension_contribution: Decimal,
    /// Housing fund contribution.
    pub housing_fund_contribution: Decimal,
    /// Employer insurance contribution.
    pub employer_insurance_contribution: Decimal,
    /// Rent relief.
    pub rent_relief: Decimal,
    /// Life assurance relief.
    pub life_assurance_relief: Decimal,
    /// Dependent relief.
    pub dependent_relief: Decimal,
    /// Disability relief.
    pub disability_relief: Decimal,
    /// Total reliefs.
    pub total_reliefs: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Take-home pay.
    pub take_home: Decimal,
    /// Effective rate, percent.
    pub effective_rate: Decimal,
    /// Whether the relief summary has anything to show.
    pub show_relief_summary: bool,
    /// Reliefs with a non-zero amount.
    pub granted_reliefs: Vec<ReliefKind>,
}

impl PeriodBreakdown {
    /// Renders an annual result in the given period.
    ///
    /// # Example
    ///
    /// ```
    /// use paye_engine::calculation::calculate_take_home;
    /// use paye_engine::config::TaxSchedule;
    /// use paye_engine::models::{CalculationOptions, Period, PeriodBreakdown};
    /// use rust_decimal_macros::dec;
    ///
    /// let schedule = TaxSchedule::nta_2025();
    /// let result = calculate_take_home(dec!(6000000), &CalculationOptions::bare(), &schedule);
    /// let monthly = PeriodBreakdown::from_result(&result, Period::Monthly);
    ///
    /// assert_eq!(monthly.gross, dec!(500000));
    /// ```
    pub fn from_result(result: &CalculationResult, period: Period) -> Self {
        let per = |amount: Decimal| round_money(period.from_annual(amount));

        Self {
            period,
            gross: per(result.gross_annual),
            taxable_income: per(result.taxable_income),
            paye_tax: per(result.paye_tax),
            pension_contribution: per(result.pension_contribution),
            housing_fund_contribution: per(result.housing_fund_contribution),
            employer_insurance_contribution: per(result.employer_insurance_contribution),
            rent_relief: per(result.rent_relief),
            life_assurance_relief: per(result.life_assurance_relief),
            dependent_relief: per(result.dependent_relief),
            disability_relief: per(result.disability_relief),
            total_reliefs: per(result.total_reliefs),
            total_deductions: per(result.total_deductions),
            take_home: per(result.take_home),
            effective_rate: result
                .effective_rate
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            show_relief_summary: result.has_reliefs(),
            granted_reliefs: result.granted_reliefs(),
        }
    }
}
