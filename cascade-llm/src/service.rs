//! The fallback selector.
//!
//! [`CascadeService`] owns the constructed adapters and the shared score
//! board. Each `generate()` call computes a fresh provider order from the
//! current counters, walks it until a provider returns text, and updates
//! counters and exclusions as it goes. Only terminal outcomes reach the
//! caller; individual attempt failures are logged and absorbed.
//!
//! The score board lives behind a single `parking_lot::Mutex`. The lock is
//! held only for counter reads/writes, never across a network call, and the
//! counters are advisory (they shape ordering, nothing else), so contention
//! is a non-issue.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use cascade_core::{classify, CascadeConfig, FailureClass, ProviderId, ScoreBoard};

use crate::client::{self, GenerationBackend};
use crate::error::{BackendError, CascadeError};
use crate::types::GenerationRequest;

/// Multi-provider generation service with fallback.
///
/// Construct one at application start and share it by reference; all state
/// is interior and transient (nothing survives a restart).
pub struct CascadeService {
    backends: Vec<Arc<dyn GenerationBackend>>,
    pub(crate) scores: Mutex<ScoreBoard>,
}

impl CascadeService {
    /// Build the service from configuration, constructing every adapter
    /// that has credentials. A service with zero adapters is valid: it
    /// reports status normally and fails generation calls with
    /// [`CascadeError::NoProviders`].
    #[must_use]
    pub fn from_config(config: &CascadeConfig) -> Self {
        Self::with_backends(client::build_backends(config))
    }

    /// Build the service over explicit adapters (tests inject scripted
    /// backends this way). Adapters are re-sorted into the fixed default
    /// priority order; a duplicate provider id keeps the first adapter.
    #[must_use]
    pub fn with_backends(mut backends: Vec<Arc<dyn GenerationBackend>>) -> Self {
        backends.sort_by_key(|backend| backend.id());
        backends.dedup_by_key(|backend| backend.id());
        let scores = ScoreBoard::new(backends.iter().map(|backend| backend.id()));
        info!(
            providers = ?backends.iter().map(|b| b.id().as_str()).collect::<Vec<_>>(),
            "fallback service initialized"
        );
        Self {
            backends,
            scores: Mutex::new(scores),
        }
    }

    fn backend(&self, id: ProviderId) -> Option<&Arc<dyn GenerationBackend>> {
        self.backends.iter().find(|backend| backend.id() == id)
    }

    /// Generate text, attempting providers in fallback order.
    ///
    /// On success the winning provider's success counter is incremented and
    /// its exclusion (if any) is cleared. On failure the attempt is
    /// classified: quota and unknown failures exclude the provider until
    /// [`CascadeService::reset_exclusions`], transient failures only count
    /// against its total.
    ///
    /// # Errors
    /// - [`CascadeError::NoProviders`] when no provider is available.
    /// - [`CascadeError::AllProvidersFailed`] when every eligible provider
    ///   was attempted and failed; carries the last failure.
    /// - [`CascadeError::DeadlineExceeded`] when the request deadline passed
    ///   before any provider returned text.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, CascadeError> {
        let order = self.scores.lock().attempt_order(request.preferred);
        if order.is_empty() {
            return Err(CascadeError::NoProviders);
        }

        let request_id = Uuid::new_v4();
        debug!(%request_id, ?order, preferred = ?request.preferred, "computed provider order");

        let mut attempted = 0usize;
        let mut last_failure: Option<BackendError> = None;

        for id in order {
            // A concurrent call may have excluded this provider after the
            // order was computed; re-check at attempt time.
            if !self.scores.lock().eligible(id) {
                debug!(%request_id, provider = %id, "provider no longer eligible; skipped");
                continue;
            }
            if let Some(deadline) = request.deadline {
                if Instant::now() >= deadline {
                    warn!(%request_id, attempted, "deadline passed before next attempt");
                    return Err(CascadeError::DeadlineExceeded { attempted });
                }
            }
            let Some(backend) = self.backend(id) else {
                continue;
            };

            attempted += 1;
            let start = Instant::now();
            let outcome = match request.deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline.into(), backend.generate(request)).await
                    {
                        Ok(outcome) => outcome,
                        Err(_) => {
                            // The attempt was routed, so it counts against the
                            // failure total, but a deadline hit is our doing
                            // and never excludes the provider.
                            self.scores.lock().record_failure(id, FailureClass::Transient);
                            warn!(%request_id, provider = %id, attempted, "deadline expired mid-attempt");
                            return Err(CascadeError::DeadlineExceeded { attempted });
                        }
                    }
                }
                None => backend.generate(request).await,
            };
            let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            match outcome {
                Ok(text) => {
                    let recovered = self.scores.lock().record_success(id);
                    if recovered {
                        info!(%request_id, provider = %id, "provider recovered; exclusion cleared");
                    }
                    debug!(%request_id, provider = %id, latency_ms, chars = text.len(), "generation succeeded");
                    return Ok(text);
                }
                Err(err) => {
                    let class = classify(&err.to_string());
                    self.scores.lock().record_failure(id, class);
                    warn!(
                        %request_id,
                        provider = %id,
                        latency_ms,
                        class = class.as_str(),
                        error = %err,
                        "provider attempt failed"
                    );
                    last_failure = Some(err);
                }
            }
        }

        match last_failure {
            Some(source) => Err(CascadeError::AllProvidersFailed {
                provider: source.provider(),
                source,
            }),
            // Every ordered provider became ineligible before its turn.
            None => Err(CascadeError::NoProviders),
        }
    }
}
