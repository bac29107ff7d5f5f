//! Remote mortgage-advisor backend
//!
//! Wraps an OpenAI-compatible chat completions API behind the
//! [`LlmBackend`] trait: given a question string, return an answer string
//! or fail. The failure taxonomy distinguishes quota exhaustion from all
//! other failures because the response policy falls back to the offline
//! estimator only for that class.

pub mod backend;
pub mod prompt;

pub use backend::{LlmBackend, LlmConfig, OpenAIBackend};
pub use prompt::{advisor_messages, Message, Role};

use thiserror::Error;

/// Remote backend errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Quota or rate limit exhausted. The only failure class the response
    /// policy treats as recoverable via the offline path.
    #[error("Quota exhausted: {0}")]
    QuotaExhausted(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}
