//! Claude adapter — Anthropic messages API.

use async_trait::async_trait;
use serde_json::{json, Value};

use cascade_core::{ProviderConfig, ProviderId};

use crate::client::GenerationBackend;
use crate::error::BackendError;
use crate::types::GenerationRequest;

/// Default API endpoint, overridable via `[claude] base_url`.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
/// Default model, overridable via `[claude] model`.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const API_VERSION: &str = "2023-06-01";

/// Adapter for the Anthropic messages API.
pub struct ClaudeBackend {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ClaudeBackend {
    /// Build the adapter from its provider settings.
    ///
    /// # Errors
    /// Returns [`BackendError::Build`] if the HTTP client cannot be
    /// constructed.
    pub fn new(settings: &ProviderConfig) -> Result<Self, BackendError> {
        let http = super::http_client(settings.timeout_ms).map_err(|e| BackendError::Build {
            provider: ProviderId::Claude,
            detail: e.to_string(),
        })?;
        Ok(Self {
            http,
            api_key: settings.api_key.clone().unwrap_or_default(),
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: settings
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}

#[async_trait]
impl GenerationBackend for ClaudeBackend {
    fn id(&self) -> ProviderId {
        ProviderId::Claude
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let provider = ProviderId::Claude;

        let messages: Vec<Value> = request
            .messages
            .iter()
            .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
            .collect();
        let mut body = json!({
            "model": self.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": messages,
        });
        if let Some(system) = &request.system {
            body["system"] = json!(system);
        }

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::from_reqwest(provider, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                provider,
                status,
                body,
            });
        }

        let value: Value = response.json().await.map_err(|e| BackendError::Parse {
            provider,
            detail: e.to_string(),
        })?;

        // Concatenate the text blocks; non-text blocks carry no "text" field
        // and are skipped.
        let text = value["content"]
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .filter_map(|block| block["text"].as_str())
                    .collect::<Vec<_>>()
                    .concat()
            })
            .unwrap_or_default();
        Ok(text)
    }
}
