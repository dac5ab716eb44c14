//! # cascade-llm — Multi-Provider LLM Fallback Service
//!
//! A unified generation interface over three external LLM backends:
//!   - **Claude** (Anthropic messages API) — default first choice
//!   - **Gemini** (Google generateContent API)
//!   - **OpenAI** (chat completions API)
//!
//! Every generation call goes through the [`CascadeService`], which:
//!   - computes a provider order (caller preference or success-rate ranking)
//!   - attempts providers sequentially until one returns text
//!   - classifies failures: quota problems exclude a provider until an
//!     explicit reset, transient trouble leaves it eligible next call
//!   - tracks per-provider success/failure counters for ranking and status
//!
//! State is in-process and transient: counters and exclusions reset on
//! restart. Callers that need durable health data should scrape
//! [`CascadeService::status`] from the outside.
//!
//! # Example
//!
//! ```no_run
//! use cascade_core::CascadeConfig;
//! use cascade_llm::{CascadeService, GenerationRequest};
//!
//! async fn example() -> Result<(), cascade_llm::CascadeError> {
//!     let config = CascadeConfig::default().overlay_env_keys();
//!     let service = CascadeService::from_config(&config);
//!
//!     let request = GenerationRequest::from_user("Bonjour, j'ai besoin d'un plombier");
//!     let reply = service.generate(&request).await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod service;
pub mod status;
pub mod types;

pub use client::GenerationBackend;
pub use error::{BackendError, CascadeError};
pub use service::CascadeService;
pub use status::{ProviderStatus, ServiceStatus, StatusLabel};
pub use types::{ChatMessage, ChatRole, GenerationRequest};
