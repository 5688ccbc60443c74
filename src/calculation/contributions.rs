//! Statutory contribution calculations.
//!
//! Employee pension and housing fund contributions are elective and deducted
//! from pay; the employer insurance contribution is always computed but only
//! reported.

use rust_decimal::Decimal;

use crate::config::ContributionRates;
use crate::models::{AuditStep, CalculationOptions};

/// Contributions computed for a gross annual income.
#[derive(Debug, Clone)]
pub struct ContributionsResult {
    /// Employee pension contribution.
    pub pension: Decimal,
    /// Employee housing fund contribution.
    pub housing_fund: Decimal,
    /// Employer-paid insurance contribution.
    pub employer_insurance: Decimal,
    /// One audit step per contribution.
    pub audit_steps: Vec<AuditStep>,
}

/// Pension contribution, zero unless elected.
///
/// # Example
///
/// ```
/// use paye_engine::calculation::pension_contribution;
/// use paye_engine::config::TaxSchedule;
/// use rust_decimal_macros::dec;
///
/// let schedule = TaxSchedule::nta_2025();
/// let rates = &schedule.rates().contributions;
/// assert_eq!(pension_contribution(dec!(6000000), true, rates), dec!(480000));
/// assert_eq!(pension_contribution(dec!(6000000), false, rates), dec!(0));
/// ```
pub fn pension_contribution(
    gross_annual: Decimal,
    include: bool,
    rates: &ContributionRates,
) -> Decimal {
    if include {
        gross_annual * rates.pension_rate
    } else {
        Decimal::ZERO
    }
}

/// Housing fund contribution, zero unless elected.
pub fn housing_fund_contribution(
    gross_annual: Decimal,
    include: bool,
    rates: &ContributionRates,
) -> Decimal {
    if include {
        gross_annual * rates.housing_fund_rate
    } else {
        Decimal::ZERO
    }
}

/// Employer insurance contribution. Always computed.
pub fn employer_insurance_contribution(
    gross_annual: Decimal,
    rates: &ContributionRates,
) -> Decimal {
    gross_annual * rates.employer_insurance_rate
}

struct ContributionLine {
    rule_id: &'static str,
    rule_name: &'static str,
    rate: Decimal,
    included: bool,
    amount: Decimal,
}

impl ContributionLine {
    fn reasoning(&self, gross_annual: Decimal) -> String {
        if self.included {
            format!(
                "{} × {} = {}",
                gross_annual.normalize(),
                self.rate.normalize(),
                self.amount.normalize()
            )
        } else {
            "Not elected - contribution is 0".to_string()
        }
    }

    fn audit_step(&self, step_number: u32, gross_annual: Decimal, reasoning: String) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: self.rule_id.to_string(),
            rule_name: self.rule_name.to_string(),
            input: serde_json::json!({
                "gross_annual": gross_annual.normalize().to_string(),
                "rate": self.rate.normalize().to_string(),
                "included": self.included
            }),
            output: serde_json::json!({
                "amount": self.amount.normalize().to_string()
            }),
            reasoning,
        }
    }
}

/// Computes all three contributions and their audit steps.
///
/// Steps are numbered from `step_number_start` in the order pension,
/// housing fund, employer insurance.
pub fn calculate_contributions(
    gross_annual: Decimal,
    options: &CalculationOptions,
    rates: &ContributionRates,
    step_number_start: u32,
) -> ContributionsResult {
    let pension = ContributionLine {
        rule_id: "pension_contribution",
        rule_name: "Pension Contribution",
        rate: rates.pension_rate,
        included: options.include_pension,
        amount: pension_contribution(gross_annual, options.include_pension, rates),
    };
    let housing_fund = ContributionLine {
        rule_id: "housing_fund_contribution",
        rule_name: "Housing Fund Contribution",
        rate: rates.housing_fund_rate,
        included: options.include_housing_fund,
        amount: housing_fund_contribution(gross_annual, options.include_housing_fund, rates),
    };
    let employer_insurance = ContributionLine {
        rule_id: "employer_insurance_contribution",
        rule_name: "Employer Insurance Contribution",
        rate: rates.employer_insurance_rate,
        included: true,
        amount: employer_insurance_contribution(gross_annual, rates),
    };

    let audit_steps = vec![
        pension.audit_step(
            step_number_start,
            gross_annual,
            pension.reasoning(gross_annual),
        ),
        housing_fund.audit_step(
            step_number_start + 1,
            gross_annual,
            housing_fund.reasoning(gross_annual),
        ),
        employer_insurance.audit_step(
            step_number_start + 2,
            gross_annual,
            format!(
                "{} (employer-paid, not deducted from take-home)",
                employer_insurance.reasoning(gross_annual)
            ),
        ),
    ];

    ContributionsResult {
        pension: pension.amount,
        housing_fund: housing_fund.amount,
        employer_insurance: employer_insurance.amount,
        audit_steps,
    }
}
