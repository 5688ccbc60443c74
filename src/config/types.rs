//! Configuration types for tax schedules.
//!
//! This module contains the strongly-typed schedule structures that are
//! deserialized from YAML configuration files, together with the validation
//! that every schedule must pass before the engine will use it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata identifying a tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Short code for the schedule (e.g., "NTA2025").
    pub code: String,
    /// The human-readable name of the schedule.
    pub name: String,
    /// ISO currency code all amounts are expressed in.
    pub currency: String,
    /// The date from which this schedule applies.
    pub effective_date: NaiveDate,
    /// Where the figures were taken from.
    pub source: String,
}

/// A single marginal band of the progressive income-tax schedule.
///
/// Income in `[lower_bound, upper_bound)` is taxed at `rate`. The final band
/// has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound of the band.
    pub lower_bound: Decimal,
    /// Exclusive upper bound of the band, `None` for the top band.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a fraction (0.15 for 15%).
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns the width of the band, or `None` if it is unbounded.
    ///
    /// # Example
    ///
    /// ```
    /// use paye_engine::config::TaxBracket;
    /// use rust_decimal_macros::dec;
    ///
    /// let band = TaxBracket {
    ///     lower_bound: dec!(800000),
    ///     upper_bound: Some(dec!(3000000)),
    ///     rate: dec!(0.15),
    /// };
    /// assert_eq!(band.width(), Some(dec!(2200000)));
    /// ```
    pub fn width(&self) -> Option<Decimal> {
        self.upper_bound.map(|upper| upper - self.lower_bound)
    }
}

/// Brackets configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketsConfig {
    /// Bands in ascending order.
    pub brackets: Vec<TaxBracket>,
}

/// Statutory contribution rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRates {
    /// Employee pension contribution rate.
    pub pension_rate: Decimal,
    /// Employee housing fund contribution rate.
    pub housing_fund_rate: Decimal,
    /// Employer-paid social insurance rate (informational only).
    pub employer_insurance_rate: Decimal,
}

fn enabled_by_default() -> bool {
    true
}

/// Rent relief: a share of annual rent paid, up to a ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentReliefRule {
    /// Whether this relief is granted under the schedule.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Share of rent that is relieved.
    pub rate: Decimal,
    /// Absolute cap on the relief.
    pub ceiling: Decimal,
}

/// Life assurance relief: the premium paid, capped by a share of gross
/// income and by an absolute ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeAssuranceReliefRule {
    /// Whether this relief is granted under the schedule.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Share of gross income the relief may not exceed.
    pub rate: Decimal,
    /// Absolute cap on the relief.
    pub ceiling: Decimal,
}

/// Flat relief per dependent, up to a maximum number of dependents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentReliefRule {
    /// Whether this relief is granted under the schedule.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Relief granted for each dependent.
    pub per_dependent: Decimal,
    /// Number of dependents beyond which no further relief is granted.
    pub max_dependents: u32,
}

/// Flat relief for persons with disabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabilityReliefRule {
    /// Whether this relief is granted under the schedule.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// The flat relief amount.
    pub amount: Decimal,
}

/// The set of reliefs a schedule grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefRules {
    /// Rent relief.
    pub rent: RentReliefRule,
    /// Life assurance relief.
    pub life_assurance: LifeAssuranceReliefRule,
    /// Dependent relief.
    pub dependents: DependentReliefRule,
    /// Disability relief.
    pub disability: DisabilityReliefRule,
}

/// Rate table loaded from rates.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    /// Contribution rates.
    pub contributions: ContributionRates,
    /// Relief rules.
    pub reliefs: ReliefRules,
}

/// A complete, validated tax schedule.
///
/// Built once at startup (from YAML via [`ConfigLoader`](super::ConfigLoader)
/// or from [`TaxSchedule::nta_2025`]) and passed by reference into every
/// calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxSchedule {
    metadata: ScheduleMetadata,
    brackets: Vec<TaxBracket>,
    rates: RateTable,
}

impl TaxSchedule {
    /// Creates a schedule from its component parts, validating brackets and
    /// rates.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] if the brackets are empty, do
    /// not start at zero, leave gaps or overlap, have a bounded top band,
    /// have decreasing rates, or if any rate lies outside `[0, 1]` or any
    /// amount is negative.
    pub fn new(
        metadata: ScheduleMetadata,
        brackets: Vec<TaxBracket>,
        rates: RateTable,
    ) -> EngineResult<Self> {
        validate_brackets(&brackets)?;
        validate_rates(&rates)?;
        Ok(Self {
            metadata,
            brackets,
            rates,
        })
    }

    /// The Nigerian PAYE schedule under the National Tax Act 2025, with all
    /// four reliefs enabled.
    ///
    /// # Example
    ///
    /// ```
    /// use paye_engine::config::TaxSchedule;
    /// use rust_decimal_macros::dec;
    ///
    /// let schedule = TaxSchedule::nta_2025();
    /// assert_eq!(schedule.brackets().len(), 6);
    /// assert_eq!(schedule.rates().contributions.pension_rate, dec!(0.08));
    /// ```
    pub fn nta_2025() -> Self {
        let band = |lower: Decimal, upper: Option<Decimal>, rate: Decimal| TaxBracket {
            lower_bound: lower,
            upper_bound: upper,
            rate,
        };

        Self {
            metadata: ScheduleMetadata {
                code: "NTA2025".to_string(),
                name: "Nigeria PAYE - National Tax Act 2025".to_string(),
                currency: "NGN".to_string(),
                effective_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
                source: "Nigeria Tax Act 2025, Fourth Schedule".to_string(),
            },
            brackets: vec![
                band(dec!(0), Some(dec!(800000)), dec!(0)),
                band(dec!(800000), Some(dec!(3000000)), dec!(0.15)),
                band(dec!(3000000), Some(dec!(12000000)), dec!(0.18)),
                band(dec!(12000000), Some(dec!(25000000)), dec!(0.21)),
                band(dec!(25000000), Some(dec!(50000000)), dec!(0.23)),
                band(dec!(50000000), None, dec!(0.25)),
            ],
            rates: RateTable {
                contributions: ContributionRates {
                    pension_rate: dec!(0.08),
                    housing_fund_rate: dec!(0.025),
                    employer_insurance_rate: dec!(0.01),
                },
                reliefs: ReliefRules {
                    rent: RentReliefRule {
                        enabled: true,
                        rate: dec!(0.20),
                        ceiling: dec!(500000),
                    },
                    life_assurance: LifeAssuranceReliefRule {
                        enabled: true,
                        rate: dec!(0.10),
                        ceiling: dec!(500000),
                    },
                    dependents: DependentReliefRule {
                        enabled: true,
                        per_dependent: dec!(100000),
                        max_dependents: 4,
                    },
                    disability: DisabilityReliefRule {
                        enabled: true,
                        amount: dec!(500000),
                    },
                },
            },
        }
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the rate table.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Returns the marginal rate of the top band.
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidSchedule {
        message: message.into(),
    }
}

/// Checks that brackets are contiguous from zero, non-overlapping, end in a
/// single unbounded band, and have non-decreasing rates in `[0, 1]`.
pub(crate) fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    let first = brackets
        .first()
        .ok_or_else(|| invalid("schedule has no brackets"))?;

    if first.lower_bound != Decimal::ZERO {
        return Err(invalid(format!(
            "first bracket must start at 0, found {}",
            first.lower_bound
        )));
    }

    let last_index = brackets.len() - 1;
    let mut previous: Option<&TaxBracket> = None;

    for (i, bracket) in brackets.iter().enumerate() {
        let n = i + 1;

        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(invalid(format!(
                "bracket {} rate {} is outside [0, 1]",
                n, bracket.rate
            )));
        }

        match bracket.upper_bound {
            Some(upper) if upper <= bracket.lower_bound => {
                return Err(invalid(format!(
                    "bracket {} upper bound {} is not above its lower bound {}",
                    n, upper, bracket.lower_bound
                )));
            }
            Some(_) if i == last_index => {
                return Err(invalid("top bracket must be unbounded"));
            }
            None if i != last_index => {
                return Err(invalid(format!(
                    "bracket {} is unbounded but is not the top bracket",
                    n
                )));
            }
            _ => {}
        }

        if let Some(prev) = previous {
            // Unbounded bands can only be last, so the previous band has an upper bound.
            let prev_upper = prev.upper_bound.unwrap_or(prev.lower_bound);
            if bracket.lower_bound != prev_upper {
                return Err(invalid(format!(
                    "bracket {} starts at {} but bracket {} ends at {}",
                    n,
                    bracket.lower_bound,
                    n - 1,
                    prev_upper
                )));
            }
            if bracket.rate < prev.rate {
                return Err(invalid(format!(
                    "bracket {} rate {} is lower than the rate {} below it",
                    n, bracket.rate, prev.rate
                )));
            }
        }

        previous = Some(bracket);
    }

    Ok(())
}

/// Checks that every rate lies in `[0, 1]` and every amount is non-negative.
pub(crate) fn validate_rates(rates: &RateTable) -> EngineResult<()> {
    let c = &rates.contributions;
    let r = &rates.reliefs;

    let fractions = [
        ("pension_rate", c.pension_rate),
        ("housing_fund_rate", c.housing_fund_rate),
        ("employer_insurance_rate", c.employer_insurance_rate),
        ("reliefs.rent.rate", r.rent.rate),
        ("reliefs.life_assurance.rate", r.life_assurance.rate),
    ];
    for (name, value) in fractions {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(invalid(format!("{} {} is outside [0, 1]", name, value)));
        }
    }

    let amounts = [
        ("reliefs.rent.ceiling", r.rent.ceiling),
        ("reliefs.life_assurance.ceiling", r.life_assurance.ceiling),
        ("reliefs.dependents.per_dependent", r.dependents.per_dependent),
        ("reliefs.disability.amount", r.disability.amount),
    ];
    for (name, value) in amounts {
        if value < Decimal::ZERO {
            return Err(invalid(format!("{} {} is negative", name, value)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(lower: Decimal, upper: Option<Decimal>, rate: Decimal) -> TaxBracket {
        TaxBracket {
            lower_bound: lower,
            upper_bound: upper,
            rate,
        }
    }

    fn expect_invalid(brackets: Vec<TaxBracket>, fragment: &str) {
        match validate_brackets(&brackets) {
            Err(EngineError::InvalidSchedule { message }) => {
                assert!(
                    message.contains(fragment),
                    "expected '{}' in '{}'",
                    fragment,
                    message
                );
            }
            other => panic!("Expected InvalidSchedule, got {:?}", other),
        }
    }

    #[test]
    fn test_nta_2025_schedule_is_valid() {
        let schedule = TaxSchedule::nta_2025();
        assert!(validate_brackets(schedule.brackets()).is_ok());
        assert!(validate_rates(schedule.rates()).is_ok());
        assert_eq!(schedule.top_rate(), dec!(0.25));
        assert_eq!(schedule.metadata().code, "NTA2025");
    }

    #[test]
    fn test_nta_2025_brackets_are_contiguous() {
        let schedule = TaxSchedule::nta_2025();
        for pair in schedule.brackets().windows(2) {
            assert_eq!(Some(pair[1].lower_bound), pair[0].upper_bound);
            assert!(pair[1].rate >= pair[0].rate);
        }
    }

    #[test]
    fn test_empty_brackets_rejected() {
        expect_invalid(vec![], "no brackets");
    }

    #[test]
    fn test_first_bracket_must_start_at_zero() {
        expect_invalid(vec![band(dec!(100), None, dec!(0.1))], "must start at 0");
    }

    #[test]
    fn test_gap_between_brackets_rejected() {
        expect_invalid(
            vec![
                band(dec!(0), Some(dec!(800000)), dec!(0)),
                band(dec!(900000), None, dec!(0.15)),
            ],
            "starts at 900000",
        );
    }

    #[test]
    fn test_overlapping_brackets_rejected() {
        expect_invalid(
            vec![
                band(dec!(0), Some(dec!(800000)), dec!(0)),
                band(dec!(700000), None, dec!(0.15)),
            ],
            "starts at 700000",
        );
    }

    #[test]
    fn test_bounded_top_bracket_rejected() {
        expect_invalid(
            vec![band(dec!(0), Some(dec!(800000)), dec!(0))],
            "top bracket must be unbounded",
        );
    }

    #[test]
    fn test_unbounded_middle_bracket_rejected() {
        expect_invalid(
            vec![
                band(dec!(0), None, dec!(0)),
                band(dec!(800000), None, dec!(0.15)),
            ],
            "is not the top bracket",
        );
    }

    #[test]
    fn test_decreasing_rate_rejected() {
        expect_invalid(
            vec![
                band(dec!(0), Some(dec!(800000)), dec!(0.2)),
                band(dec!(800000), None, dec!(0.15)),
            ],
            "lower than the rate",
        );
    }

    #[test]
    fn test_rate_above_one_rejected() {
        expect_invalid(vec![band(dec!(0), None, dec!(1.5))], "outside [0, 1]");
    }

    #[test]
    fn test_empty_width_bracket_rejected() {
        expect_invalid(
            vec![
                band(dec!(0), Some(dec!(0)), dec!(0)),
                band(dec!(0), None, dec!(0.15)),
            ],
            "not above its lower bound",
        );
    }

    #[test]
    fn test_negative_relief_ceiling_rejected() {
        let mut rates = TaxSchedule::nta_2025().rates().clone();
        rates.reliefs.rent.ceiling = dec!(-1);

        match validate_rates(&rates) {
            Err(EngineError::InvalidSchedule { message }) => {
                assert!(message.contains("reliefs.rent.ceiling"))
            }
            other => panic!("Expected InvalidSchedule, got {:?}", other),
        }
    }

    #[test]
    fn test_pension_rate_above_one_rejected() {
        let mut rates = TaxSchedule::nta_2025().rates().clone();
        rates.contributions.pension_rate = dec!(8);

        assert!(validate_rates(&rates).is_err());
    }

    #[test]
    fn test_schedule_new_validates() {
        let base = TaxSchedule::nta_2025();
        let result = TaxSchedule::new(
            base.metadata().clone(),
            vec![band(dec!(0), Some(dec!(10)), dec!(0))],
            base.rates().clone(),
        );
        assert!(result.is_err());

        let ok = TaxSchedule::new(
            base.metadata().clone(),
            base.brackets().to_vec(),
            base.rates().clone(),
        );
        assert_eq!(ok.unwrap(), base);
    }

    #[test]
    fn test_bracket_width() {
        assert_eq!(
            band(dec!(800000), Some(dec!(3000000)), dec!(0.15)).width(),
            Some(dec!(2200000))
        );
        assert_eq!(band(dec!(50000000), None, dec!(0.25)).width(), None);
    }

    #[test]
    fn test_relief_enabled_defaults_to_true() {
        let yaml = "rate: \"0.20\"\nceiling: \"500000\"\n";
        let rule: RentReliefRule = serde_yaml::from_str(yaml).unwrap();
        assert!(rule.enabled);
        assert_eq!(rule.rate, dec!(0.20));
    }
}
