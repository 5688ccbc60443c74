//! Progressive bracket tax calculation.
//!
//! This module walks the marginal bands of a schedule to compute PAYE on a
//! taxable income.
//!
//! ## Band Semantics
//!
//! Each band covers `[lower_bound, upper_bound)`. Income is consumed band by
//! band, each band taking at most its width, so income sitting exactly on a
//! boundary is taxed entirely in the band that ends there.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxBracket;
use crate::models::AuditStep;

/// The portion of income charged within one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCharge {
    /// Lower bound of the band.
    pub lower_bound: Decimal,
    /// Upper bound of the band, `None` for the top band.
    pub upper_bound: Option<Decimal>,
    /// Marginal rate of the band.
    pub rate: Decimal,
    /// Income taxed in this band.
    pub amount_taxed: Decimal,
    /// Tax charged in this band.
    pub tax: Decimal,
}

/// The result of a bracket tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTaxResult {
    /// Total tax owed.
    pub tax: Decimal,
    /// Charges for each band that received income.
    pub bands: Vec<BandCharge>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the tax owed on `taxable_income` under `brackets`.
///
/// Negative income is treated as zero. The brackets are expected to be
/// validated (contiguous from zero, ascending); see
/// [`TaxSchedule::new`](crate::config::TaxSchedule::new).
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::calculate_paye;
/// use paye_engine::config::TaxSchedule;
/// use rust_decimal_macros::dec;
///
/// let schedule = TaxSchedule::nta_2025();
///
/// assert_eq!(calculate_paye(dec!(800000), schedule.brackets()), dec!(0));
/// assert_eq!(calculate_paye(dec!(3000000), schedule.brackets()), dec!(330000));
/// assert_eq!(calculate_paye(dec!(12000000), schedule.brackets()), dec!(1950000));
/// ```
pub fn calculate_paye(taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    charge_bands(taxable_income, brackets)
        .iter()
        .map(|band| band.tax)
        .sum()
}

fn charge_bands(taxable_income: Decimal, brackets: &[TaxBracket]) -> Vec<BandCharge> {
    let mut remaining = taxable_income.max(Decimal::ZERO);
    let mut charges = Vec::new();

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }

        let amount = match bracket.width() {
            Some(width) => remaining.min(width),
            None => remaining,
        };

        if amount > Decimal::ZERO {
            charges.push(BandCharge {
                lower_bound: bracket.lower_bound,
                upper_bound: bracket.upper_bound,
                rate: bracket.rate,
                amount_taxed: amount,
                tax: amount * bracket.rate,
            });
            remaining -= amount;
        }
    }

    charges
}

fn percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

/// Computes bracket tax together with the per-band breakdown and an audit
/// step.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::calculate_bracket_tax;
/// use paye_engine::config::TaxSchedule;
/// use rust_decimal_macros::dec;
///
/// let schedule = TaxSchedule::nta_2025();
/// let result = calculate_bracket_tax(dec!(5080000), schedule.brackets(), 1);
///
/// assert_eq!(result.tax, dec!(704400));
/// assert_eq!(result.bands.len(), 3);
/// assert_eq!(result.bands[2].amount_taxed, dec!(2080000));
/// ```
pub fn calculate_bracket_tax(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
    step_number: u32,
) -> BracketTaxResult {
    let bands = charge_bands(taxable_income, brackets);
    let tax: Decimal = bands.iter().map(|band| band.tax).sum();

    let reasoning = if bands.is_empty() {
        "No taxable income - PAYE is 0".to_string()
    } else {
        let parts: Vec<String> = bands
            .iter()
            .map(|b| format!("{} @ {}", b.amount_taxed.normalize(), percent(b.rate)))
            .collect();
        format!("{} = {}", parts.join(" + "), tax.normalize())
    };

    let band_output: Vec<serde_json::Value> = bands
        .iter()
        .map(|b| {
            serde_json::json!({
                "lower_bound": b.lower_bound.normalize().to_string(),
                "upper_bound": b.upper_bound.map(|u| u.normalize().to_string()),
                "rate": b.rate.normalize().to_string(),
                "amount_taxed": b.amount_taxed.normalize().to_string(),
                "tax": b.tax.normalize().to_string()
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "paye_brackets".to_string(),
        rule_name: "Progressive PAYE".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "bracket_count": brackets.len()
        }),
        output: serde_json::json!({
            "bands": band_output,
            "tax": tax.normalize().to_string()
        }),
        reasoning,
    };

    BracketTaxResult {
        tax,
        bands,
        audit_step,
    }
}
