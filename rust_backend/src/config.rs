//! Rules and repository configuration file support.
//!
//! Reads `rules.toml`:
//!
//! ```toml
//! [repository]
//! type = "http"
//!
//! [http]
//! base_url = "https://obras.example.gob.pe/api"
//! timeout_secs = 20
//!
//! [rules]
//! contract_number_pattern = '^N\.º \d{2}-\d{4}-[A-Z]{3}/[A-Z]{2}$'
//! max_execution_days = 1095
//! supervision_ratio_cap = "0.20"
//! max_termination_years = 5
//! percentage_tolerance = 0.01
//! ```
//!
//! Every section is optional. Missing `[rules]` keys keep the built-in limits.

use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::{RepositoryError, RepositoryType};
use crate::validation::ValidationPolicy;

/// Configuration loaded from `rules.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub rules: RulesSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

/// Remote roster API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Overrides for [`ValidationPolicy`]. Unset keys keep the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesSettings {
    pub contract_number_pattern: Option<String>,
    pub max_execution_days: Option<u32>,
    pub supervision_ratio_cap: Option<Decimal>,
    pub max_termination_years: Option<u32>,
    pub percentage_tolerance: Option<f64>,
}

/// Upper bound accepted for `rules.max_termination_years`.
pub const MAX_TERMINATION_YEARS: u32 = 100;

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl RulesConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        let config = Self::from_toml_str(&content)?;
        info!("Loaded rules configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `rules.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        Self::load_default()?.ok_or_else(|| {
            RepositoryError::ConfigurationError(
                "No rules.toml found in standard locations".to_string(),
            )
        })
    }

    /// Like [`from_default_location`](Self::from_default_location), but a
    /// missing file is `Ok(None)`. A file that exists and cannot be read or
    /// parsed is still an error.
    pub fn load_default() -> Result<Option<Self>, RepositoryError> {
        let search_paths = [
            PathBuf::from("rules.toml"),
            PathBuf::from("rust_backend/rules.toml"),
            PathBuf::from("../rules.toml"),
        ];
        Self::from_first_existing(&search_paths)
    }

    /// Load the first of `paths` that exists.
    pub fn from_first_existing(paths: &[PathBuf]) -> Result<Option<Self>, RepositoryError> {
        for path in paths {
            if path.exists() {
                return Self::from_file(path).map(Some);
            }
            debug!("No config at {}", path.display());
        }
        Ok(None)
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        RepositoryType::from_str(&self.repository.repo_type).map_err(|e| {
            RepositoryError::ConfigurationError(format!("Invalid repository type: {}", e))
        })
    }

    /// Build the validation policy, applying `[rules]` overrides.
    pub fn validation_policy(&self) -> Result<ValidationPolicy, RepositoryError> {
        let rules = &self.rules;
        let mut policy = match &rules.contract_number_pattern {
            Some(pattern) => ValidationPolicy::with_contract_pattern(pattern).map_err(|e| {
                RepositoryError::ConfigurationError(format!(
                    "Invalid rules.contract_number_pattern: {}",
                    e
                ))
            })?,
            None => ValidationPolicy::default(),
        };

        if let Some(days) = rules.max_execution_days {
            if days == 0 {
                return Err(RepositoryError::ConfigurationError(
                    "rules.max_execution_days must be at least 1".to_string(),
                ));
            }
            policy.max_execution_days = days;
        }

        if let Some(cap) = rules.supervision_ratio_cap {
            if cap.is_sign_negative() {
                return Err(RepositoryError::ConfigurationError(
                    "rules.supervision_ratio_cap must not be negative".to_string(),
                ));
            }
            policy.supervision_ratio_cap = cap;
        }

        if let Some(years) = rules.max_termination_years {
            if !(1..=MAX_TERMINATION_YEARS).contains(&years) {
                return Err(RepositoryError::ConfigurationError(format!(
                    "rules.max_termination_years must be between 1 and {}",
                    MAX_TERMINATION_YEARS
                )));
            }
            policy.max_termination_years = years;
        }

        if let Some(tolerance) = rules.percentage_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(RepositoryError::ConfigurationError(
                    "rules.percentage_tolerance must be a non-negative number".to_string(),
                ));
            }
            policy.percentage_tolerance = tolerance;
        }

        Ok(policy)
    }
}
