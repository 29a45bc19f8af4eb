//! OpenRouterProvider -- concrete [`ChatProvider`] implementation for the
//! OpenRouter chat-completions API.
//!
//! Sends one non-streaming request per call to `/chat/completions` with
//! bearer auth and the two attribution headers OpenRouter expects
//! (`HTTP-Referer`, `X-Title`).
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use stratboard_core::llm::provider::ChatProvider;
use stratboard_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::types::OpenRouterResponse;

/// OpenRouter completion provider.
///
/// Implements [`ChatProvider`] for the OpenRouter chat-completions API.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the Authorization header. It never appears in Debug
/// output, Display output, or tracing logs.
pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    http_referer: String,
    app_title: String,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenRouter API key wrapped in SecretString
    /// * `http_referer` / `app_title` - attribution header values
    pub fn new(api_key: SecretString, http_referer: String, app_title: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://openrouter.ai/api/v1".to_string(),
            http_referer,
            app_title,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// OpenRouterProvider intentionally does NOT derive Debug to prevent
// accidental exposure of internal state.

impl ChatProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let url = self.url("/chat/completions");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .header("HTTP-Referer", &self.http_referer)
            .header("X-Title", &self.app_title)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(LlmError::Transport(format!("HTTP {status}: {error_body}")));
        }

        let body: OpenRouterResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        if let Some(error) = body.error {
            return Err(LlmError::Api {
                message: error
                    .message
                    .unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        let mut choices = body.choices.ok_or(LlmError::MissingChoices)?;
        if choices.is_empty() {
            return Err(LlmError::MissingChoices);
        }

        Ok(CompletionResponse {
            id: body.id,
            model: body.model,
            content: choices.remove(0).message.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> OpenRouterProvider {
        OpenRouterProvider::new(
            SecretString::from("test-key-not-real"),
            "http://localhost:8501".to_string(),
            "Board of Directors Chat".to_string(),
        )
    }

    #[test]
    fn test_provider_name() {
        let provider = make_provider();
        assert_eq!(provider.name(), "openrouter");
    }

    #[test]
    fn test_base_url_override() {
        let provider = make_provider().with_base_url("http://localhost:8080/".to_string());
        assert_eq!(
            provider.url("/chat/completions"),
            "http://localhost:8080/chat/completions"
        );
    }

    #[test]
    fn test_default_base_url() {
        let provider = make_provider();
        assert_eq!(
            provider.url("/chat/completions"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }
}
