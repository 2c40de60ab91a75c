//! LLM request/response types
//!
//! Provider-agnostic shapes for a single-shot text completion. Each client
//! converts these to and from its own wire format.

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System prompt
    pub system_prompt: String,

    /// The single user turn
    pub prompt: String,

    /// Max tokens for response, capped by the client's configured limit
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Create a request with one user prompt
    pub fn single(system_prompt: impl Into<String>, prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
            max_tokens,
        }
    }
}

/// Response from a completion request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionResponse {
    /// Raw generated text
    pub content: String,

    /// Token usage, when the provider reports it
    pub usage: TokenUsage,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request() {
        let req = CompletionRequest::single("system", "Break this down", 2000);
        assert_eq!(req.system_prompt, "system");
        assert_eq!(req.prompt, "Break this down");
        assert_eq!(req.max_tokens, 2000);
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage {
            input_tokens: 120,
            output_tokens: 30,
        };
        assert_eq!(usage.total(), 150);
    }
}
