//! Take-home pay calculation.
//!
//! This module combines contributions, reliefs and bracket tax into the
//! itemized [`CalculationResult`].
//!
//! ## Tax Base
//!
//! Pension contributions and reliefs reduce taxable income. The housing fund
//! contribution is deducted from pay but does not reduce taxable income.

use rust_decimal::Decimal;

use crate::config::TaxSchedule;
use crate::models::{AuditStep, AuditTrace, AuditWarning, CalculationOptions, CalculationResult};

use super::bracket_tax::calculate_bracket_tax;
use super::contributions::calculate_contributions;
use super::reliefs::calculate_reliefs;

/// Computes take-home pay for a gross annual income.
///
/// Deterministic and side-effect free. Negative gross income is clamped to
/// zero and recorded as a warning in the audit trace.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::calculate_take_home;
/// use paye_engine::config::TaxSchedule;
/// use paye_engine::models::CalculationOptions;
/// use rust_decimal_macros::dec;
///
/// let schedule = TaxSchedule::nta_2025();
/// let options = CalculationOptions {
///     annual_rent: dec!(1200000),
///     dependents: 2,
///     ..CalculationOptions::default()
/// };
///
/// let result = calculate_take_home(dec!(6000000), &options, &schedule);
///
/// assert_eq!(result.taxable_income, dec!(5080000));
/// assert_eq!(result.paye_tax, dec!(704400));
/// assert_eq!(result.take_home, dec!(4665600));
/// assert_eq!(result.take_home + result.total_deductions, result.gross_annual);
/// ```
pub fn calculate_take_home(
    gross_annual: Decimal,
    options: &CalculationOptions,
    schedule: &TaxSchedule,
) -> CalculationResult {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    let gross = if gross_annual < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_GROSS_CLAMPED".to_string(),
            message: format!(
                "Gross income {} is negative and was treated as 0",
                gross_annual.normalize()
            ),
            severity: "medium".to_string(),
        });
        Decimal::ZERO
    } else {
        gross_annual
    };

    let rates = schedule.rates();

    let contributions = calculate_contributions(gross, options, &rates.contributions, 1);
    steps.extend(contributions.audit_steps);

    let reliefs = calculate_reliefs(gross, options, &rates.reliefs, next_step(&steps));
    steps.extend(reliefs.audit_steps);
    warnings.extend(reliefs.warnings);

    let taxable_income = (gross - contributions.pension - reliefs.total).max(Decimal::ZERO);
    steps.push(AuditStep {
        step_number: next_step(&steps),
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        input: serde_json::json!({
            "gross_annual": gross.normalize().to_string(),
            "pension_contribution": contributions.pension.normalize().to_string(),
            "total_reliefs": reliefs.total.normalize().to_string()
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string()
        }),
        reasoning: format!(
            "max(0, {} - {} - {}) = {} (housing fund does not reduce the tax base)",
            gross.normalize(),
            contributions.pension.normalize(),
            reliefs.total.normalize(),
            taxable_income.normalize()
        ),
    });

    let paye = calculate_bracket_tax(taxable_income, schedule.brackets(), next_step(&steps));
    steps.push(paye.audit_step);

    let total_deductions = paye.tax + contributions.pension + contributions.housing_fund;
    let take_home = gross - total_deductions;
    let effective_rate = if gross > Decimal::ZERO {
        total_deductions / gross * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    steps.push(AuditStep {
        step_number: next_step(&steps),
        rule_id: "take_home".to_string(),
        rule_name: "Take-Home Pay".to_string(),
        input: serde_json::json!({
            "gross_annual": gross.normalize().to_string(),
            "paye_tax": paye.tax.normalize().to_string(),
            "pension_contribution": contributions.pension.normalize().to_string(),
            "housing_fund_contribution": contributions.housing_fund.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.normalize().to_string(),
            "take_home": take_home.normalize().to_string(),
            "effective_rate": effective_rate.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} = {}",
            gross.normalize(),
            total_deductions.normalize(),
            take_home.normalize()
        ),
    });

    CalculationResult {
        gross_annual: gross,
        taxable_income,
        paye_tax: paye.tax,
        pension_contribution: contributions.pension,
        housing_fund_contribution: contributions.housing_fund,
        employer_insurance_contribution: contributions.employer_insurance,
        rent_relief: reliefs.rent,
        life_assurance_relief: reliefs.life_assurance,
        dependent_relief: reliefs.dependents,
        disability_relief: reliefs.disability,
        total_reliefs: reliefs.total,
        total_deductions,
        take_home,
        effective_rate,
        audit_trace: AuditTrace { steps, warnings },
    }
}

fn next_step(steps: &[AuditStep]) -> u32 {
    steps.len() as u32 + 1
}
