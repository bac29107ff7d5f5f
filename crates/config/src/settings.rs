//! Main settings module

use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use loan_advisor_core::LoanAssumptions;

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Answer every query locally, never calling the remote advisor
    #[serde(default)]
    pub offline_mode: bool,

    /// Loan assumptions used by the offline estimator
    #[serde(default)]
    pub loan: LoanSettings,

    /// Remote advisor configuration
    #[serde(default)]
    pub llm: LlmSettings,
}

/// Loan assumption settings, validated against the core bounds on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSettings {
    /// Assumed nominal annual interest rate (%)
    #[serde(default = "default_annual_rate_pct")]
    pub annual_rate_pct: f64,

    /// Bond term (years)
    #[serde(default = "default_term_years")]
    pub term_years: u32,

    /// Max repayment as % of gross income
    #[serde(default = "default_repayment_pct")]
    pub repayment_pct: u32,
}

fn default_annual_rate_pct() -> f64 {
    11.75
}

fn default_term_years() -> u32 {
    20
}

fn default_repayment_pct() -> u32 {
    30
}

impl Default for LoanSettings {
    fn default() -> Self {
        Self {
            annual_rate_pct: default_annual_rate_pct(),
            term_years: default_term_years(),
            repayment_pct: default_repayment_pct(),
        }
    }
}

/// Remote advisor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key. Falls back to the OPENAI_API_KEY environment variable;
    /// absence means the advisor runs without a remote backend.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> usize {
    512
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmSettings {
    /// Resolve the API key from settings or the conventional environment
    /// variable. `None` means offline-capable startup, not an error.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Validate settings and produce the loan assumptions used per query.
    ///
    /// Bounds are enforced here so the estimator never sees out-of-range
    /// values and does not need to clamp.
    pub fn assumptions(&self) -> Result<LoanAssumptions, ConfigError> {
        Ok(LoanAssumptions::new(
            self.loan.annual_rate_pct,
            self.loan.term_years,
            self.loan.repayment_pct,
        )?)
    }
}

/// Load settings from files and environment.
///
/// Priority: env vars > config/{env}.yaml > config/default.yaml > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder().add_source(File::with_name("config/default").required(false));

    if let Some(env) = env {
        builder = builder.add_source(File::with_name(&format!("config/{env}")).required(false));
        tracing::debug!(env, "layering environment-specific settings");
    }

    let config = builder
        .add_source(
            Environment::with_prefix("LOAN_ADVISOR")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_validate() {
        let settings = Settings::default();
        let assumptions = settings.assumptions().unwrap();
        assert_eq!(assumptions.annual_rate_pct, 11.75);
        assert_eq!(assumptions.term_years, 20);
        assert_eq!(assumptions.repayment_pct, 30);
        assert!(!settings.offline_mode);
    }

    #[test]
    fn out_of_bounds_assumptions_are_rejected() {
        let mut settings = Settings::default();
        settings.loan.annual_rate_pct = 3.0;
        assert!(matches!(
            settings.assumptions(),
            Err(ConfigError::Assumptions(_))
        ));

        let mut settings = Settings::default();
        settings.loan.term_years = 50;
        assert!(settings.assumptions().is_err());

        let mut settings = Settings::default();
        settings.loan.repayment_pct = 95;
        assert!(settings.assumptions().is_err());
    }

    #[test]
    fn settings_deserialize_from_yaml_with_partial_fields() {
        let yaml = "offline_mode: true\nloan:\n  annual_rate_pct: 9.5\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert!(settings.offline_mode);
        assert_eq!(settings.loan.annual_rate_pct, 9.5);
        // Unspecified fields keep their defaults
        assert_eq!(settings.loan.term_years, 20);
        assert_eq!(settings.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn empty_api_key_resolves_to_none() {
        let settings = LlmSettings {
            api_key: Some(String::new()),
            ..LlmSettings::default()
        };
        // May still pick up OPENAI_API_KEY from the test environment; only
        // assert when it is unset.
        if std::env::var("OPENAI_API_KEY").is_err() {
            assert_eq!(settings.resolved_api_key(), None);
        }
    }
}
