//! Chat service: one user turn against the completion provider.
//!
//! `get_reply` is the whole contract between a session and the remote
//! model: compose the system message, send `[system] + history` in one
//! request, and reduce every failure to a localized apology string. From
//! the caller's perspective the surface is binary -- a reply string comes
//! back, never an error.

use std::collections::HashMap;

use tracing::error;

use stratboard_types::config::Language;
use stratboard_types::llm::{CompletionRequest, LlmError, Message};

use crate::llm::provider::ChatProvider;
use crate::prompt::compose_system_message;

/// Runs completion turns against a [`ChatProvider`].
///
/// Generic over the provider trait so the orchestration stays testable
/// without any HTTP (stratboard-core never depends on stratboard-infra).
pub struct ChatService<P: ChatProvider> {
    provider: P,
    model: String,
    temperature: f64,
}

impl<P: ChatProvider> ChatService<P> {
    /// Create a chat service with a fixed model id and sampling temperature.
    pub fn new(provider: P, model: String, temperature: f64) -> Self {
        Self {
            provider,
            model,
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one completion turn over the full history.
    ///
    /// The outbound message list is `[system] + history`, untruncated: no
    /// windowing or token budgeting happens here. Exactly one request is
    /// issued -- no retry, no backoff, no streaming. Failures are logged
    /// and mapped to a localized apology: transport-level failures get the
    /// *connecting* apology, everything else (erroring body, missing
    /// choices, undecodable JSON, template without the language) gets the
    /// *processing* apology.
    pub async fn get_reply(
        &self,
        history: &[Message],
        board_members: &[String],
        language: Language,
        system_prompts: &HashMap<Language, String>,
    ) -> String {
        let system_message = match compose_system_message(board_members, language, system_prompts) {
            Ok(message) => message,
            Err(err) => {
                error!(provider = self.provider.name(), error = %err, "failed to compose system message");
                return processing_apology(language).to_string();
            }
        };

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(Message::system(system_message));
        messages.extend_from_slice(history);

        let request = CompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages,
        };

        match self.provider.complete(&request).await {
            Ok(response) => response.content,
            Err(err) => {
                error!(provider = self.provider.name(), error = %err, "completion request failed");
                let apology = if err.is_transport() {
                    connecting_apology(language)
                } else {
                    processing_apology(language)
                };
                apology.to_string()
            }
        }
    }
}

/// Apology shown when the request never got a well-formed response.
pub fn connecting_apology(language: Language) -> &'static str {
    match language {
        Language::English => "I apologize, but I encountered an error while connecting to the API.",
        Language::Russian => "Извините, произошла ошибка при подключении к API.",
    }
}

/// Apology shown when a response arrived but could not be used.
pub fn processing_apology(language: Language) -> &'static str {
    match language {
        Language::English => {
            "I apologize, but I encountered an error while processing your request."
        }
        Language::Russian => "Извините, произошла ошибка при обработке вашего запроса.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use stratboard_types::config::BoardConfig;
    use stratboard_types::llm::{CompletionResponse, MessageRole};

    /// Provider double that records the last request and returns a canned
    /// result.
    struct FakeProvider {
        result: fn() -> Result<CompletionResponse, LlmError>,
        last_request: Mutex<Option<CompletionRequest>>,
    }

    impl FakeProvider {
        fn new(result: fn() -> Result<CompletionResponse, LlmError>) -> Self {
            Self {
                result,
                last_request: Mutex::new(None),
            }
        }
    }

    impl ChatProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            (self.result)()
        }
    }

    fn ok_reply() -> Result<CompletionResponse, LlmError> {
        Ok(CompletionResponse {
            id: Some("gen-1".to_string()),
            model: Some("openai/gpt-4o-2024-11-20".to_string()),
            content: "Laozi: flow like water.".to_string(),
        })
    }

    fn service(result: fn() -> Result<CompletionResponse, LlmError>) -> ChatService<FakeProvider> {
        ChatService::new(
            FakeProvider::new(result),
            "openai/gpt-4o-2024-11-20".to_string(),
            1.0,
        )
    }

    fn board() -> Vec<String> {
        vec!["Laozi".to_string(), "Steve Jobs".to_string()]
    }

    #[tokio::test]
    async fn test_reply_is_first_choice_content_verbatim() {
        let service = service(ok_reply);
        let config = BoardConfig::default();
        let history = vec![Message::user("What should I build?")];

        let reply = service
            .get_reply(&history, &board(), Language::English, &config.system_prompts)
            .await;
        assert_eq!(reply, "Laozi: flow like water.");
    }

    #[tokio::test]
    async fn test_outbound_messages_are_system_plus_history() {
        for history_len in [0usize, 1, 1000] {
            let service = service(ok_reply);
            let config = BoardConfig::default();
            let history: Vec<Message> = (0..history_len)
                .map(|i| {
                    if i % 2 == 0 {
                        Message::user(format!("q{i}"))
                    } else {
                        Message::assistant(format!("a{i}"))
                    }
                })
                .collect();

            service
                .get_reply(&history, &board(), Language::English, &config.system_prompts)
                .await;

            let request = service
                .provider
                .last_request
                .lock()
                .unwrap()
                .take()
                .unwrap();
            assert_eq!(request.messages.len(), history_len + 1);
            assert_eq!(request.messages[0].role, MessageRole::System);
            assert!(request.messages[0].content.contains("Laozi, Steve Jobs"));
            assert_eq!(&request.messages[1..], &history[..]);
            assert_eq!(request.model, "openai/gpt-4o-2024-11-20");
            assert_eq!(request.temperature, 1.0);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_returns_connecting_apology() {
        let service = service(|| Err(LlmError::Transport("connection refused".to_string())));
        let config = BoardConfig::default();

        let reply = service
            .get_reply(&[], &board(), Language::English, &config.system_prompts)
            .await;
        assert_eq!(reply, connecting_apology(Language::English));

        let reply = service
            .get_reply(&[], &board(), Language::Russian, &config.system_prompts)
            .await;
        assert_eq!(reply, connecting_apology(Language::Russian));
    }

    #[tokio::test]
    async fn test_api_error_body_returns_processing_apology() {
        let service = service(|| {
            Err(LlmError::Api {
                message: "invalid model".to_string(),
            })
        });
        let config = BoardConfig::default();

        let reply = service
            .get_reply(&[], &board(), Language::English, &config.system_prompts)
            .await;
        assert_eq!(reply, processing_apology(Language::English));
    }

    #[tokio::test]
    async fn test_missing_choices_returns_processing_apology() {
        let service = service(|| Err(LlmError::MissingChoices));
        let config = BoardConfig::default();

        let reply = service
            .get_reply(&[], &board(), Language::Russian, &config.system_prompts)
            .await;
        assert_eq!(reply, processing_apology(Language::Russian));
    }

    #[tokio::test]
    async fn test_missing_template_returns_processing_apology_without_calling_provider() {
        let service = service(ok_reply);
        let prompts = HashMap::from([(Language::English, "{members}".to_string())]);

        let reply = service
            .get_reply(&[], &board(), Language::Russian, &prompts)
            .await;
        assert_eq!(reply, processing_apology(Language::Russian));
        assert!(service.provider.last_request.lock().unwrap().is_none());
    }
}
