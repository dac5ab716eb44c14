//! OpenAI adapter — chat completions API.

use async_trait::async_trait;
use serde_json::{json, Value};

use cascade_core::{ProviderConfig, ProviderId};

use crate::client::GenerationBackend;
use crate::error::BackendError;
use crate::types::GenerationRequest;

/// Default API endpoint, overridable via `[openai] base_url`.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
/// Default model, overridable via `[openai] model`.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Adapter for the OpenAI chat completions API.
pub struct OpenAiBackend {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiBackend {
    /// Build the adapter from its provider settings.
    ///
    /// # Errors
    /// Returns [`BackendError::Build`] if the HTTP client cannot be
    /// constructed.
    pub fn new(settings: &ProviderConfig) -> Result<Self, BackendError> {
        let http = super::http_client(settings.timeout_ms).map_err(|e| BackendError::Build {
            provider: ProviderId::OpenAi,
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
impl GenerationBackend for OpenAiBackend {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let provider = ProviderId::OpenAi;

        // The system instruction travels as a leading "system" message.
        let mut messages: Vec<Value> = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.extend(
            request
                .messages
                .iter()
                .map(|m| json!({ "role": m.role.as_str(), "content": m.content })),
        );
        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
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

        let text = value["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();
        Ok(text)
    }
}
