//! OpenAI-compatible backend implementation.
//!
//! One question, one blocking round-trip, one answer. The policy layer
//! owns all fallback behavior, so this backend makes a single attempt
//! with no retry loop and no backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::prompt::{advisor_messages, Message};
use crate::LlmError;

/// Error code OpenAI returns in the JSON error body when the account has
/// run out of quota. Checked structurally first; raw-text matching is the
/// fallback for transports that return unstructured errors.
const QUOTA_ERROR_CODE: &str = "insufficient_quota";

/// Remote backend configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API endpoint (OpenAI: https://api.openai.com/v1)
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Temperature
    pub temperature: f32,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 512,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Remote collaborator: given a question, return an answer or fail.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Ask a single free-text question and return the answer text.
    async fn ask(&self, question: &str) -> Result<String, LlmError>;

    /// Check if the backend is reachable.
    async fn is_available(&self) -> bool;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// OpenAI-compatible backend
///
/// Works with OpenAI and any server exposing the same chat completions
/// surface (vLLM, LiteLLM proxies, local servers).
pub struct OpenAIBackend {
    config: LlmConfig,
    client: Client,
}

impl OpenAIBackend {
    /// Create a new backend. Fails on a missing API key for non-local
    /// endpoints rather than at first use.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() && !config.endpoint.starts_with("http://localhost") {
            return Err(LlmError::Configuration(
                "API key required for remote endpoints".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn chat_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }

    async fn execute(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status.as_u16(), &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("no choices in completion".to_string()))
    }
}

#[async_trait]
impl LlmBackend for OpenAIBackend {
    async fn ask(&self, question: &str) -> Result<String, LlmError> {
        let start = std::time::Instant::now();
        let result = self.execute(advisor_messages(question)).await;

        match &result {
            Ok(answer) => tracing::debug!(
                model = %self.config.model,
                elapsed_ms = start.elapsed().as_millis() as u64,
                answer_len = answer.len(),
                "remote advisor answered"
            ),
            Err(e) => tracing::warn!(
                model = %self.config.model,
                error = %e,
                "remote advisor call failed"
            ),
        }

        result
    }

    async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/models", self.config.endpoint.trim_end_matches('/')))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Map a failed HTTP response onto the error taxonomy.
///
/// Quota exhaustion is detected structurally (HTTP 429, or the
/// `insufficient_quota` code/type in the JSON error body); a substring
/// check on the raw body is kept as a last resort for proxies that mangle
/// the error envelope.
fn classify_api_error(status: u16, body: &str) -> LlmError {
    let detail = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    if status == 429 {
        return LlmError::QuotaExhausted(detail);
    }

    if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(body) {
        let code = envelope.error.code.as_deref().unwrap_or_default();
        let kind = envelope.error.kind.as_deref().unwrap_or_default();
        if code == QUOTA_ERROR_CODE || kind == QUOTA_ERROR_CODE {
            return LlmError::QuotaExhausted(detail);
        }
    } else if body.contains(QUOTA_ERROR_CODE) {
        return LlmError::QuotaExhausted(detail);
    }

    LlmError::Api(format!("HTTP {status}: {detail}"))
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}
