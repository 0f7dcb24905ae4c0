//! Claude API client for intent classification.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ClassifierConfig;

use super::error::ClassifierError;
use super::types::{ChatRequest, ChatResponse, Message, Tool, ToolChoice};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API client.
#[derive(Clone)]
pub struct ClaudeClient {
    inner: Arc<ClaudeClientInner>,
}

struct ClaudeClientInner {
    client: reqwest::Client,
    model: String,
    max_tokens: u32,
}

impl ClaudeClient {
    /// Create a new Claude client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key contains invalid header characters or
    /// the HTTP client cannot be built. Requests time out after `config.timeout`.
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| ClassifierError::Config("Invalid API key for header".to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", api_key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClaudeClientInner {
                client,
                model: config.model.clone(),
                max_tokens: config.max_tokens,
            }),
        })
    }

    /// Send a single-turn request offering `tools`, letting Claude pick at most one.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self, message, system, tools), fields(model = %self.inner.model))]
    pub async fn choose_tool(
        &self,
        message: &str,
        system: String,
        tools: Vec<Tool>,
    ) -> Result<ChatResponse, ClassifierError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: self.inner.max_tokens,
            messages: vec![Message::user(message)],
            system: Some(system),
            tools: Some(tools),
            tool_choice: Some(ToolChoice::Auto {
                disable_parallel_tool_use: true,
            }),
        };

        let response = self
            .inner
            .client
            .post(ANTHROPIC_API_URL)
            .json(&request)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Decode a success body, or map the status to an error.
    async fn handle_response(response: reqwest::Response) -> Result<ChatResponse, ClassifierError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body)
                .map_err(|e| ClassifierError::Parse(format!("Failed to parse response: {e}")));
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await.unwrap_or_default();

        Err(ClassifierError::from_status(
            status.as_u16(),
            retry_after.as_deref(),
            &body,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claude_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<ClaudeClient>();
    }

    #[test]
    fn test_claude_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClaudeClient>();
    }

    #[test]
    fn test_claude_client_rejects_bad_header_key() {
        let config = ClassifierConfig {
            api_key: secrecy::SecretString::from("bad\nkey"),
            model: "claude-3-5-haiku-latest".to_string(),
            max_tokens: 512,
            timeout: std::time::Duration::from_secs(20),
        };
        assert!(matches!(
            ClaudeClient::new(&config),
            Err(ClassifierError::Config(_))
        ));
    }

    #[test]
    fn test_claude_client_builds_with_timeout() {
        let config = ClassifierConfig {
            api_key: secrecy::SecretString::from("sk-ant-REDACTED"),
            model: "claude-3-5-haiku-latest".to_string(),
            max_tokens: 512,
            timeout: std::time::Duration::from_millis(1500),
        };
        assert!(ClaudeClient::new(&config).is_ok());
    }
}
