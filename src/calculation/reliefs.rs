//! Relief calculations.
//!
//! Four independent capping functions turn a raw entitlement into the
//! relief granted against the tax base. Which of them apply is decided by the
//! schedule's relief set; a disabled relief is always zero.

use rust_decimal::Decimal;

use crate::config::{
    DependentReliefRule, DisabilityReliefRule, LifeAssuranceReliefRule, ReliefRules,
    RentReliefRule,
};
use crate::models::{AuditStep, AuditWarning, CalculationOptions, ReliefKind};

/// Rent relief: the lower of `annual_rent × rate` and the ceiling.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::rent_relief;
/// use paye_engine::config::TaxSchedule;
/// use rust_decimal_macros::dec;
///
/// let schedule = TaxSchedule::nta_2025();
/// let rule = &schedule.rates().reliefs.rent;
/// assert_eq!(rent_relief(dec!(2000000), rule), dec!(400000));
/// assert_eq!(rent_relief(dec!(3000000), rule), dec!(500000));
/// ```
pub fn rent_relief(annual_rent: Decimal, rule: &RentReliefRule) -> Decimal {
    if annual_rent <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (annual_rent * rule.rate).min(rule.ceiling)
}

/// Life assurance relief: the premium, capped by the lower of
/// `gross_income × rate` and the ceiling.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::life_assurance_relief;
/// use paye_engine::config::TaxSchedule;
/// use rust_decimal_macros::dec;
///
/// let schedule = TaxSchedule::nta_2025();
/// let rule = &schedule.rates().reliefs.life_assurance;
/// // 10% of 2,000,000 caps the 300,000 premium at 200,000
/// assert_eq!(life_assurance_relief(dec!(300000), dec!(2000000), rule), dec!(200000));
/// ```
pub fn life_assurance_relief(
    premium: Decimal,
    gross_income: Decimal,
    rule: &LifeAssuranceReliefRule,
) -> Decimal {
    if premium <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let cap = (gross_income * rule.rate).min(rule.ceiling).max(Decimal::ZERO);
    premium.min(cap)
}

/// Dependent relief: a flat amount per dependent, up to the maximum number
/// of dependents.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::dependent_relief;
/// use paye_engine::config::TaxSchedule;
/// use rust_decimal_macros::dec;
///
/// let schedule = TaxSchedule::nta_2025();
/// let rule = &schedule.rates().reliefs.dependents;
/// assert_eq!(dependent_relief(2, rule), dec!(200000));
/// assert_eq!(dependent_relief(6, rule), dependent_relief(4, rule));
/// ```
pub fn dependent_relief(count: u32, rule: &DependentReliefRule) -> Decimal {
    Decimal::from(count.min(rule.max_dependents)) * rule.per_dependent
}

/// Disability relief: a flat amount, not prorated.
pub fn disability_relief(has_disability: bool, rule: &DisabilityReliefRule) -> Decimal {
    if has_disability {
        rule.amount
    } else {
        Decimal::ZERO
    }
}

/// Returns whether the schedule grants a relief.
pub fn relief_enabled(kind: ReliefKind, rules: &ReliefRules) -> bool {
    match kind {
        ReliefKind::Rent => rules.rent.enabled,
        ReliefKind::LifeAssurance => rules.life_assurance.enabled,
        ReliefKind::Dependents => rules.dependents.enabled,
        ReliefKind::Disability => rules.disability.enabled,
    }
}

/// Applies one relief to the caller's inputs, honouring the relief set.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::apply_relief;
/// use paye_engine::config::TaxSchedule;
/// use paye_engine::models::{CalculationOptions, ReliefKind};
/// use rust_decimal_macros::dec;
///
/// let mut rules = TaxSchedule::nta_2025().rates().reliefs.clone();
/// let options = CalculationOptions { dependents: 2, ..CalculationOptions::default() };
///
/// assert_eq!(apply_relief(ReliefKind::Dependents, dec!(0), &options, &rules), dec!(200000));
///
/// rules.dependents.enabled = false;
/// assert_eq!(apply_relief(ReliefKind::Dependents, dec!(0), &options, &rules), dec!(0));
/// ```
pub fn apply_relief(
    kind: ReliefKind,
    gross_annual: Decimal,
    options: &CalculationOptions,
    rules: &ReliefRules,
) -> Decimal {
    if !relief_enabled(kind, rules) {
        return Decimal::ZERO;
    }

    match kind {
        ReliefKind::Rent => rent_relief(options.annual_rent, &rules.rent),
        ReliefKind::LifeAssurance => life_assurance_relief(
            options.life_assurance_premium,
            gross_annual,
            &rules.life_assurance,
        ),
        ReliefKind::Dependents => dependent_relief(options.dependents, &rules.dependents),
        ReliefKind::Disability => disability_relief(options.has_disability, &rules.disability),
    }
}

/// Reliefs granted for one calculation.
#[derive(Debug, Clone)]
pub struct ReliefsResult {
    /// Rent relief.
    pub rent: Decimal,
    /// Life assurance relief.
    pub life_assurance: Decimal,
    /// Dependent relief.
    pub dependents: Decimal,
    /// Disability relief.
    pub disability: Decimal,
    /// Sum of all four.
    pub total: Decimal,
    /// One audit step per relief, in [`ReliefKind::ALL`] order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings for claims that were capped.
    pub warnings: Vec<AuditWarning>,
}

fn raw_claim(kind: ReliefKind, options: &CalculationOptions) -> serde_json::Value {
    match kind {
        ReliefKind::Rent => serde_json::json!({
            "annual_rent": options.annual_rent.normalize().to_string()
        }),
        ReliefKind::LifeAssurance => serde_json::json!({
            "premium": options.life_assurance_premium.normalize().to_string()
        }),
        ReliefKind::Dependents => serde_json::json!({
            "dependents": options.dependents
        }),
        ReliefKind::Disability => serde_json::json!({
            "has_disability": options.has_disability
        }),
    }
}

fn cap_warning(
    kind: ReliefKind,
    gross_annual: Decimal,
    options: &CalculationOptions,
    rules: &ReliefRules,
) -> Option<AuditWarning> {
    let warning = |code: &str, message: String| AuditWarning {
        code: code.to_string(),
        message,
        severity: "low".to_string(),
    };

    match kind {
        ReliefKind::Rent => {
            let uncapped = options.annual_rent * rules.rent.rate;
            (uncapped > rules.rent.ceiling).then(|| {
                warning(
                    "RENT_RELIEF_CAPPED",
                    format!(
                        "Rent relief of {} capped at {}",
                        uncapped.normalize(),
                        rules.rent.ceiling.normalize()
                    ),
                )
            })
        }
        ReliefKind::LifeAssurance => {
            let granted = life_assurance_relief(
                options.life_assurance_premium,
                gross_annual,
                &rules.life_assurance,
            );
            (options.life_assurance_premium > granted).then(|| {
                warning(
                    "LIFE_ASSURANCE_CAPPED",
                    format!(
                        "Life assurance premium of {} capped at {}",
                        options.life_assurance_premium.normalize(),
                        granted.normalize()
                    ),
                )
            })
        }
        ReliefKind::Dependents => {
            (options.dependents > rules.dependents.max_dependents).then(|| {
                warning(
                    "DEPENDENTS_CAPPED",
                    format!(
                        "{} dependents claimed, relief capped at {}",
                        options.dependents, rules.dependents.max_dependents
                    ),
                )
            })
        }
        ReliefKind::Disability => None,
    }
}

/// Computes every relief in the schedule's relief set.
///
/// Steps are numbered from `step_number_start` in [`ReliefKind::ALL`] order.
pub fn calculate_reliefs(
    gross_annual: Decimal,
    options: &CalculationOptions,
    rules: &ReliefRules,
    step_number_start: u32,
) -> ReliefsResult {
    let mut amounts = [Decimal::ZERO; 4];
    let mut audit_steps = Vec::with_capacity(ReliefKind::ALL.len());
    let mut warnings = Vec::new();

    for (i, kind) in ReliefKind::ALL.into_iter().enumerate() {
        let enabled = relief_enabled(kind, rules);
        let amount = apply_relief(kind, gross_annual, options, rules);
        amounts[i] = amount;

        if enabled {
            warnings.extend(cap_warning(kind, gross_annual, options, rules));
        }

        let reasoning = if !enabled {
            format!("{} is not granted under this schedule", kind.display_name())
        } else if amount.is_zero() {
            format!("No {} claimed", kind.display_name().to_lowercase())
        } else {
            format!("{} granted: {}", kind.display_name(), amount.normalize())
        };

        audit_steps.push(AuditStep {
            step_number: step_number_start + i as u32,
            rule_id: kind.rule_id().to_string(),
            rule_name: kind.display_name().to_string(),
            input: raw_claim(kind, options),
            output: serde_json::json!({
                "enabled": enabled,
                "amount": amount.normalize().to_string()
            }),
            reasoning,
        });
    }

    let [rent, life_assurance, dependents, disability] = amounts;

    ReliefsResult {
        rent,
        life_assurance,
        dependents,
        disability,
        total: rent + life_assurance + dependents + disability,
        audit_steps,
        warnings,
    }
}
