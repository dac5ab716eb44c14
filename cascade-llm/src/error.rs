//! Error types for the fallback service.
//!
//! [`BackendError`] is a single failed provider attempt. Its `Display` text
//! is what the failure classifier sees, so the formats below deliberately
//! surface the keywords the classifier looks for: HTTP statuses render with
//! their canonical reason ("503 Service Unavailable"), timeouts say
//! "timeout", connect failures say "connection error", and API error bodies
//! are carried verbatim (that's where "insufficient credits" and friends
//! live).
//!
//! [`CascadeError`] is what callers of `generate()` see: only the terminal
//! outcomes propagate, never individual attempt failures.

use reqwest::StatusCode;
use thiserror::Error;

use cascade_core::ProviderId;

/// A single provider attempt failure.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The provider answered with a non-success HTTP status.
    #[error("{provider} API error: HTTP {status}: {body}")]
    Api {
        /// Which provider answered.
        provider: ProviderId,
        /// Response status, rendered with its canonical reason.
        status: StatusCode,
        /// Response body text, carried verbatim for classification.
        body: String,
    },

    /// The request did not complete within the HTTP client timeout.
    #[error("{provider} request timeout")]
    Timeout {
        /// Which provider timed out.
        provider: ProviderId,
    },

    /// The provider could not be reached.
    #[error("{provider} connection error: {detail}")]
    Connect {
        /// Which provider was unreachable.
        provider: ProviderId,
        /// Transport-level detail.
        detail: String,
    },

    /// The request failed in transit for some other reason.
    #[error("{provider} request failed: {detail}")]
    Request {
        /// Which provider was being called.
        provider: ProviderId,
        /// Transport-level detail.
        detail: String,
    },

    /// The provider returned a 2xx whose body did not parse.
    #[error("{provider} returned a malformed response: {detail}")]
    Parse {
        /// Which provider answered.
        provider: ProviderId,
        /// Decode failure detail.
        detail: String,
    },

    /// The adapter's HTTP client could not be constructed.
    #[error("{provider} client construction failed: {detail}")]
    Build {
        /// Which adapter failed to construct.
        provider: ProviderId,
        /// Construction failure detail.
        detail: String,
    },
}

impl BackendError {
    /// Map a `reqwest` transport error onto the attempt-failure taxonomy.
    #[must_use]
    pub fn from_reqwest(provider: ProviderId, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout { provider }
        } else if err.is_connect() {
            BackendError::Connect {
                provider,
                detail: err.to_string(),
            }
        } else {
            BackendError::Request {
                provider,
                detail: err.to_string(),
            }
        }
    }

    /// Which provider produced this failure.
    #[must_use]
    pub fn provider(&self) -> ProviderId {
        match self {
            BackendError::Api { provider, .. }
            | BackendError::Timeout { provider }
            | BackendError::Connect { provider, .. }
            | BackendError::Request { provider, .. }
            | BackendError::Parse { provider, .. }
            | BackendError::Build { provider, .. } => *provider,
        }
    }
}

/// Terminal failure of a whole `generate()` call.
#[derive(Error, Debug)]
pub enum CascadeError {
    /// No provider was configured/constructed at startup, so there is
    /// nothing to attempt.
    #[error("no generation providers are available")]
    NoProviders,

    /// Every eligible provider was attempted and failed.
    #[error("all generation providers failed; last error from {provider}: {source}")]
    AllProvidersFailed {
        /// The last provider attempted.
        provider: ProviderId,
        /// Its failure, kept for diagnostics.
        #[source]
        source: BackendError,
    },

    /// The request deadline passed before any provider returned text.
    /// Distinct from [`CascadeError::AllProvidersFailed`]: remaining
    /// providers were abandoned, not exhausted.
    #[error("generation deadline exceeded after {attempted} attempt(s)")]
    DeadlineExceeded {
        /// Attempts that were actually routed before the deadline hit.
        attempted: usize,
    },
}
