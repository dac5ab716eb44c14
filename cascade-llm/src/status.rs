//! Status and diagnostics reporting.
//!
//! Snapshot types consumed by a status endpoint somewhere above this crate.
//! Reports always cover the whole closed provider set, including providers
//! that were never constructed, so dashboards can tell "not configured"
//! from "configured but failing".

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use cascade_core::ProviderId;

use crate::service::CascadeService;

/// Derived health label for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLabel {
    /// Available and not excluded.
    Operational,
    /// Never constructed, or currently excluded.
    Failed,
}

impl StatusLabel {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusLabel::Operational => "operational",
            StatusLabel::Failed => "failed",
        }
    }
}

/// Point-in-time health snapshot of one provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    /// Whether the adapter was constructed at startup.
    pub available: bool,
    /// Whether the provider is currently excluded.
    pub excluded: bool,
    /// Successful attempts since startup.
    pub success_count: u64,
    /// Failed attempts since startup.
    pub failure_count: u64,
    /// Observed success rate (optimistic 1.0 at zero attempts).
    pub success_rate: f64,
    /// Derived health label.
    pub status: StatusLabel,
}

/// Snapshot of the whole service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    /// Per-provider health, keyed by provider name, in default priority
    /// order.
    pub providers: BTreeMap<ProviderId, ProviderStatus>,
    /// The provider a caller should prefer right now, if any is eligible.
    pub recommended: Option<ProviderId>,
}

impl CascadeService {
    /// Snapshot health and counters for every provider in the fixed set.
    #[must_use]
    pub fn status(&self) -> ServiceStatus {
        let scores = self.scores.lock();
        let providers = ProviderId::ALL
            .into_iter()
            .map(|id| {
                let state = scores.state(id);
                let available = scores.is_available(id);
                let excluded = scores.is_excluded(id);
                let status = if available && !excluded {
                    StatusLabel::Operational
                } else {
                    StatusLabel::Failed
                };
                (
                    id,
                    ProviderStatus {
                        available,
                        excluded,
                        success_count: state.success_count,
                        failure_count: state.failure_count,
                        success_rate: state.success_rate(),
                        status,
                    },
                )
            })
            .collect();
        ServiceStatus {
            providers,
            recommended: scores.recommended(),
        }
    }

    /// The eligible provider with the best success rate, if any.
    #[must_use]
    pub fn recommended(&self) -> Option<ProviderId> {
        self.scores.lock().recommended()
    }

    /// Clear the exclusion flag on every provider (manual recovery after,
    /// say, a billing fix). Counters are untouched.
    pub fn reset_exclusions(&self) {
        self.scores.lock().reset_exclusions();
        info!("provider exclusions reset");
    }
}
