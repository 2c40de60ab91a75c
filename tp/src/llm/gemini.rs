//! Google Gemini API client implementation
//!
//! Implements the LlmClient trait for the Generative Language `generateContent`
//! endpoint. When no model is configured, the client lists the models
//! available to the API key and picks one before generating.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, TokenUsage};
use crate::config::ResolvedLlmConfig;

/// Gemini API client
pub struct GeminiClient {
    /// Pinned model; discovered per call when `None`
    model: Option<String>,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
    temperature: f32,
}

impl GeminiClient {
    /// Create a new client from resolved configuration
    pub fn from_config(config: &ResolvedLlmConfig) -> Result<Self, LlmError> {
        debug!(?config, "from_config: called");
        let api_key = config.get_api_key()?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Resolve the model path (`models/<name>`) to call
    async fn model_path(&self) -> Result<String, LlmError> {
        let name = match &self.model {
            Some(model) => {
                debug!(%model, "model_path: using configured model");
                model.clone()
            }
            None => self.discover_model().await?,
        };
        Ok(normalize_model_path(&name))
    }

    /// List available models and pick the best match
    async fn discover_model(&self) -> Result<String, LlmError> {
        debug!("discover_model: called");
        let url = format!("{}/v1/models", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_response(status.as_u16(), &text));
        }

        let listing: ModelList = response.json().await?;
        let chosen = choose_model(&listing.models).ok_or_else(|| LlmError::NoModels {
            provider: "Gemini".to_string(),
        })?;

        info!(model = %chosen, "Calling Gemini model");
        Ok(chosen.to_string())
    }

    /// Build the request body for the generateContent endpoint
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(%request.max_tokens, "build_request_body: called");
        let text = if request.system_prompt.is_empty() {
            request.prompt.clone()
        } else {
            format!("{}\n\n{}", request.system_prompt, request.prompt)
        };

        serde_json::json!({
            "contents": [
                {
                    "parts": [
                        { "text": text }
                    ]
                }
            ],
            "generationConfig": {
                "maxOutputTokens": request.max_tokens.min(self.max_tokens),
                "temperature": self.temperature,
            }
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%request.max_tokens, "complete: called");
        let model_path = self.model_path().await?;
        let url = format!("{}/v1/{}:generateContent", self.base_url, model_path);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_response(status.as_u16(), &text));
        }

        let api_response: serde_json::Value = response.json().await?;
        parse_response(&api_response)
    }

    fn provider(&self) -> &'static str {
        "gemini"
    }
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}

/// First model whose name mentions "gemini", else the first listed
fn choose_model(models: &[ModelInfo]) -> Option<&str> {
    models
        .iter()
        .find(|m| m.name.to_lowercase().contains("gemini"))
        .or_else(|| models.first())
        .map(|m| m.name.as_str())
}

fn normalize_model_path(name: &str) -> String {
    if name.starts_with("models/") {
        name.to_string()
    } else {
        format!("models/{}", name)
    }
}

/// Extract the generated text from a generateContent response
///
/// `candidates` is normally an array and its first element is used. A bare
/// object in that position is accepted as the candidate itself. Anything that
/// does not lead to `content.parts[0].text` is an invalid response.
fn parse_response(value: &serde_json::Value) -> Result<CompletionResponse, LlmError> {
    let candidates = &value["candidates"];
    let candidate = if let Some(items) = candidates.as_array() {
        items.first()
    } else if candidates.is_object() {
        Some(candidates)
    } else {
        None
    };

    let text = candidate
        .and_then(|c| c["content"]["parts"][0]["text"].as_str())
        .ok_or_else(|| LlmError::InvalidResponse("Unexpected Gemini response format".to_string()))?;

    let usage = TokenUsage {
        input_tokens: value["usageMetadata"]["promptTokenCount"].as_u64().unwrap_or(0),
        output_tokens: value["usageMetadata"]["candidatesTokenCount"].as_u64().unwrap_or(0),
    };

    Ok(CompletionResponse {
        content: text.to_string(),
        usage,
    })
}
