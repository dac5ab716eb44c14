//! # Cascade Core
//!
//! Provider-agnostic logic for the Cascade multi-LLM fallback client:
//!
//! - **Provider identity** — the closed set of supported backends and their
//!   fixed default priority order
//! - **Failure classification** — keyword-based triage of provider errors
//!   into quota, transient, and unknown categories
//! - **Runtime state** — per-provider success/failure counters, the
//!   exclusion set, and the fallback ordering policy
//! - **Configuration** — TOML-backed settings with env-var credential overlay
//!
//! Everything in this crate is synchronous and free of I/O so it can be
//! unit-tested without a network or an async runtime. The async service
//! layer lives in `cascade-llm`.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod config;
pub mod error;
pub mod provider;
pub mod state;

pub use classify::{classify, FailureClass};
pub use config::{CascadeConfig, ProviderConfig};
pub use error::CoreError;
pub use provider::ProviderId;
pub use state::{ProviderState, ScoreBoard};
