//! Tunable limits used by the aggregate validators.
//!
//! The defaults encode the municipal rules; deployments can override them from
//! the `[rules]` section of `rules.toml` (see [`crate::config`]).

use regex::Regex;
use rust_decimal::Decimal;

use super::percentages::SUM_TOLERANCE;

/// Contract numbers look like `N.º 07-2025-MDS/GM`.
pub const DEFAULT_CONTRACT_NUMBER_PATTERN: &str = r"^N\.º \d{2}-\d{4}-[A-Z]{3}/[A-Z]{2}$";
pub const DEFAULT_MAX_EXECUTION_DAYS: u32 = 1095;
pub const DEFAULT_MAX_TERMINATION_YEARS: u32 = 5;

/// Supervision amount cap as a fraction of the execution amount (20%).
pub fn default_supervision_ratio_cap() -> Decimal {
    Decimal::new(20, 2)
}

#[derive(Debug, Clone)]
pub struct ValidationPolicy {
    pub contract_number_pattern: Regex,
    pub max_execution_days: u32,
    pub supervision_ratio_cap: Decimal,
    pub max_termination_years: u32,
    pub percentage_tolerance: f64,
}

impl ValidationPolicy {
    /// Default policy with a custom contract-number pattern.
    pub fn with_contract_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            contract_number_pattern: Regex::new(pattern)?,
            ..Self::default()
        })
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            contract_number_pattern: Regex::new(DEFAULT_CONTRACT_NUMBER_PATTERN)
                .expect("default contract number pattern is valid"),
            max_execution_days: DEFAULT_MAX_EXECUTION_DAYS,
            supervision_ratio_cap: default_supervision_ratio_cap(),
            max_termination_years: DEFAULT_MAX_TERMINATION_YEARS,
            percentage_tolerance: SUM_TOLERANCE,
        }
    }
}
