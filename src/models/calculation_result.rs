//! Calculation result models for the PAYE engine.
//!
//! This module contains the [`CalculationResult`] type and the audit trace
//! that records how each figure was reached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The reliefs a schedule can grant.
///
/// # Example
///
/// ```
/// use paye_engine::models::ReliefKind;
///
/// assert_eq!(ReliefKind::ALL.len(), 4);
/// assert_eq!(serde_json::to_string(&ReliefKind::LifeAssurance).unwrap(), "\"life_assurance\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefKind {
    /// Relief on annual rent paid.
    Rent,
    /// Relief on life assurance premiums.
    LifeAssurance,
    /// Relief per dependent.
    Dependents,
    /// Flat disability relief.
    Disability,
}

impl ReliefKind {
    /// Every relief, in the order they are applied and reported.
    pub const ALL: [ReliefKind; 4] = [
        ReliefKind::Rent,
        ReliefKind::LifeAssurance,
        ReliefKind::Dependents,
        ReliefKind::Disability,
    ];

    /// Stable identifier used in audit steps.
    pub fn rule_id(self) -> &'static str {
        match self {
            ReliefKind::Rent => "rent_relief",
            ReliefKind::LifeAssurance => "life_assurance_relief",
            ReliefKind::Dependents => "dependent_relief",
            ReliefKind::Disability => "disability_relief",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            ReliefKind::Rent => "Rent Relief",
            ReliefKind::LifeAssurance => "Life Assurance Relief",
            ReliefKind::Dependents => "Dependent Relief",
            ReliefKind::Disability => "Disability Relief",
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag input that was capped or clamped; they never stop a
/// calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The itemized result of a take-home calculation, in annual terms.
///
/// Invariants:
/// - `take_home + total_deductions == gross_annual`
/// - `total_deductions == paye_tax + pension_contribution + housing_fund_contribution`
/// - `taxable_income == max(0, gross_annual - pension_contribution - total_reliefs)`
///
/// The employer insurance contribution is reported for information and is
/// not part of `total_deductions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Gross annual income.
    pub gross_annual: Decimal,
    /// Income subject to PAYE after pension and reliefs.
    pub taxable_income: Decimal,
    /// PAYE tax owed on the taxable income.
    pub paye_tax: Decimal,
    /// Employee pension contribution.
    pub pension_contribution: Decimal,
    /// Employee housing fund contribution.
    pub housing_fund_contribution: Decimal,
    /// Employer-paid insurance contribution.
    pub employer_insurance_contribution: Decimal,
    /// Capped rent relief.
    pub rent_relief: Decimal,
    /// Capped life assurance relief.
    pub life_assurance_relief: Decimal,
    /// Capped dependent relief.
    pub dependent_relief: Decimal,
    /// Disability relief.
    pub disability_relief: Decimal,
    /// Sum of the four reliefs.
    pub total_reliefs: Decimal,
    /// PAYE plus employee contributions.
    pub total_deductions: Decimal,
    /// Net annual pay.
    pub take_home: Decimal,
    /// Total deductions as a percentage of gross income.
    pub effective_rate: Decimal,
    /// Record of every rule applied.
    pub audit_trace: AuditTrace,
}

impl CalculationResult {
    /// Returns the amount granted for one relief.
    pub fn relief(&self, kind: ReliefKind) -> Decimal {
        match kind {
            ReliefKind::Rent => self.rent_relief,
            ReliefKind::LifeAssurance => self.life_assurance_relief,
            ReliefKind::Dependents => self.dependent_relief,
            ReliefKind::Disability => self.disability_relief,
        }
    }

    /// Returns the reliefs with a non-zero amount, in reporting order.
    pub fn granted_reliefs(&self) -> Vec<ReliefKind> {
        ReliefKind::ALL
            .into_iter()
            .filter(|kind| self.relief(*kind) > Decimal::ZERO)
            .collect()
    }

    /// Returns true if any relief was granted.
    pub fn has_reliefs(&self) -> bool {
        self.total_reliefs > Decimal::ZERO
    }
}
