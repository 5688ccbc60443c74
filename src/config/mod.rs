//! Tax schedule configuration for the PAYE engine.
//!
//! This module provides functionality to load a tax schedule from YAML files:
//! schedule metadata, the marginal brackets, and the rate table with its
//! relief set. A compiled-in NTA 2025 schedule is available through
//! [`TaxSchedule::nta_2025`].
//!
//! # Example
//!
//! ```no_run
//! use paye_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/nta2025").unwrap();
//! println!("Loaded schedule: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BracketsConfig, ContributionRates, DependentReliefRule, DisabilityReliefRule,
    LifeAssuranceReliefRule, RateTable, ReliefRules, RentReliefRule, ScheduleMetadata,
    TaxBracket, TaxSchedule,
};
