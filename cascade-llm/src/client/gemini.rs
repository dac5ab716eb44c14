//! Gemini adapter — Google generateContent API.

use async_trait::async_trait;
use serde_json::{json, Value};

use cascade_core::{ProviderConfig, ProviderId};

use crate::client::GenerationBackend;
use crate::error::BackendError;
use crate::types::{ChatRole, GenerationRequest};

/// Default API endpoint, overridable via `[gemini] base_url`.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Default model, overridable via `[gemini] model`.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Adapter for the Google generateContent API.
pub struct GeminiBackend {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiBackend {
    /// Build the adapter from its provider settings.
    ///
    /// # Errors
    /// Returns [`BackendError::Build`] if the HTTP client cannot be
    /// constructed.
    pub fn new(settings: &ProviderConfig) -> Result<Self, BackendError> {
        let http = super::http_client(settings.timeout_ms).map_err(|e| BackendError::Build {
            provider: ProviderId::Gemini,
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
impl GenerationBackend for GeminiBackend {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let provider = ProviderId::Gemini;

        let contents: Vec<Value> = request
            .messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "model",
                };
                json!({ "role": role, "parts": [{ "text": m.content }] })
            })
            .collect();
        let mut body = json!({
            "contents": contents,
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_tokens,
            },
        });
        if let Some(system) = &request.system {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let response = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
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

        // A 200 with no candidates (e.g. everything safety-filtered) is a
        // valid empty result, not an error.
        let text = value["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<Vec<_>>()
                    .concat()
            })
            .unwrap_or_default();
        Ok(text)
    }
}
