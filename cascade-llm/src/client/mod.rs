//! Provider client adapters.
//!
//! One adapter per backend, each translating a [`GenerationRequest`] into
//! that provider's wire shape and returning plain text. Adapters never
//! swallow errors — every failure propagates as a [`BackendError`] so the
//! selector can classify it from the error text.

mod claude;
mod gemini;
mod openai;

pub use claude::ClaudeBackend;
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use cascade_core::{CascadeConfig, ProviderId};

use crate::error::BackendError;
use crate::types::GenerationRequest;

/// One external text-generation backend.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Which provider this adapter wraps.
    fn id(&self) -> ProviderId;

    /// Run one generation attempt. Returns the generated text; an empty
    /// string is a valid result for providers that can answer with no
    /// content.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError>;
}

/// Construct every adapter that has credentials.
///
/// Providers without an API key are skipped silently (they never existed as
/// far as the selector is concerned). A construction failure is logged and
/// skipped without aborting the remaining adapters.
pub(crate) fn build_backends(config: &CascadeConfig) -> Vec<Arc<dyn GenerationBackend>> {
    let mut backends: Vec<Arc<dyn GenerationBackend>> = Vec::new();
    for id in ProviderId::ALL {
        let settings = config.provider(id);
        if !settings.is_configured() {
            debug!(provider = %id, "no API key configured; adapter skipped");
            continue;
        }
        let built: Result<Arc<dyn GenerationBackend>, BackendError> = match id {
            ProviderId::Claude => ClaudeBackend::new(settings).map(|b| Arc::new(b) as _),
            ProviderId::Gemini => GeminiBackend::new(settings).map(|b| Arc::new(b) as _),
            ProviderId::OpenAi => OpenAiBackend::new(settings).map(|b| Arc::new(b) as _),
        };
        match built {
            Ok(backend) => backends.push(backend),
            Err(err) => {
                warn!(provider = %id, error = %err, "adapter construction failed; provider unavailable");
            }
        }
    }
    backends
}

/// HTTP client shared setup: per-request timeout from the provider config.
pub(crate) fn http_client(timeout_ms: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
}
