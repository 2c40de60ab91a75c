//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client - each call is independent
///
/// One implementation exists per provider; the planner picks one at startup
/// and shares it behind an `Arc`, so implementations must be `Send + Sync`
/// and hold no per-request state.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request and wait for the full text
    ///
    /// Exactly one provider round trip is made; failures are not retried.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Provider name for logging
    fn provider(&self) -> &'static str;
}
