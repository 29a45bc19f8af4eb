//! ChatProvider trait definition.
//!
//! The one abstraction over the remote chat-completion API. Uses RPITIT
//! (native async fn in traits, Rust 2024 edition). Implementations live
//! in stratboard-infra (e.g. `OpenRouterProvider`).

use stratboard_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends.
///
/// One request, one response: no streaming, no retries. The provider maps
/// its wire-level failures onto [`LlmError`] so callers can distinguish
/// transport failures from erroring response bodies.
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name (e.g. "openrouter").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
