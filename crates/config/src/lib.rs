//! Configuration management for the loan advisor
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, then `config/{env}.yaml`)
//! - Environment variables (`LOAN_ADVISOR_` prefix, `__` nesting separator)
//!
//! Settings are validated before anything reaches the estimator: the loan
//! assumption bounds of `loan-advisor-core` are enforced here, once, at
//! the boundary.

pub mod settings;

pub use settings::{load_settings, LlmSettings, LoanSettings, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid loan assumptions: {0}")]
    Assumptions(#[from] loan_advisor_core::AssumptionsError),
}
