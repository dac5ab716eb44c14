//! Per-provider runtime state and the fallback ordering policy.
//!
//! A [`ScoreBoard`] holds counters and exclusion flags for the whole closed
//! provider set. It is plain data — the async service wraps it in a mutex —
//! and every ordering decision is computed fresh from the counters, so the
//! state here is advisory: it shapes the attempt order, never correctness.

use crate::classify::FailureClass;
use crate::provider::ProviderId;

/// Mutable per-provider record.
///
/// Invariant: `success_count + failure_count` equals the number of attempts
/// ever routed to the provider during process lifetime. `excluded` only
/// flips back to `false` on a recovery (successful attempt) or an explicit
/// reset; resets never touch the counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderState {
    /// Attempts that returned text.
    pub success_count: u64,
    /// Attempts that raised, including transient failures.
    pub failure_count: u64,
    /// Whether the provider is excluded from attempts until reset.
    pub excluded: bool,
}

impl ProviderState {
    /// Total attempts ever routed to this provider.
    #[must_use]
    pub const fn attempts(&self) -> u64 {
        self.success_count + self.failure_count
    }

    /// Observed success rate, with 1.0 as the optimistic default at zero
    /// attempts so untested providers rank ahead of ones with any observed
    /// failure.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        let attempts = self.attempts();
        if attempts == 0 {
            1.0
        } else {
            self.success_count as f64 / attempts as f64
        }
    }
}

/// Runtime state for the whole provider set: which providers were
/// constructed at startup, their counters, and the exclusion set.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    states: [ProviderState; ProviderId::COUNT],
    available: [bool; ProviderId::COUNT],
}

impl ScoreBoard {
    /// Create a score board where exactly the given providers are available.
    ///
    /// Providers absent from `available` were never constructed (missing
    /// credentials or failed setup); they keep zeroed counters and never
    /// appear in any attempt order, but still show up in status reports.
    #[must_use]
    pub fn new(available: impl IntoIterator<Item = ProviderId>) -> Self {
        let mut board = Self {
            states: [ProviderState::default(); ProviderId::COUNT],
            available: [false; ProviderId::COUNT],
        };
        for id in available {
            board.available[id.index()] = true;
        }
        board
    }

    /// Snapshot of one provider's counters and exclusion flag.
    #[must_use]
    pub fn state(&self, id: ProviderId) -> ProviderState {
        self.states[id.index()]
    }

    /// Whether the provider was constructed at startup.
    #[must_use]
    pub fn is_available(&self, id: ProviderId) -> bool {
        self.available[id.index()]
    }

    /// Whether the provider is currently excluded.
    #[must_use]
    pub fn is_excluded(&self, id: ProviderId) -> bool {
        self.states[id.index()].excluded
    }

    /// Available and not excluded — i.e. a candidate for the next attempt.
    #[must_use]
    pub fn eligible(&self, id: ProviderId) -> bool {
        self.is_available(id) && !self.is_excluded(id)
    }

    /// Record a successful attempt.
    ///
    /// Returns `true` if the provider had been excluded and this success
    /// cleared the flag (a recovery), so the caller can log it.
    pub fn record_success(&mut self, id: ProviderId) -> bool {
        let state = &mut self.states[id.index()];
        state.success_count += 1;
        let recovered = state.excluded;
        state.excluded = false;
        recovered
    }

    /// Record a failed attempt of the given class.
    ///
    /// Quota and unknown failures set the exclusion flag; transient failures
    /// only count against the failure total.
    pub fn record_failure(&mut self, id: ProviderId, class: FailureClass) {
        let state = &mut self.states[id.index()];
        state.failure_count += 1;
        if class.excludes_provider() {
            state.excluded = true;
        }
    }

    /// Clear the exclusion flag on every provider. Counters are untouched.
    pub fn reset_exclusions(&mut self) {
        for state in &mut self.states {
            state.excluded = false;
        }
    }

    /// Eligible providers sorted by success rate, best first.
    ///
    /// The sort is stable over the fixed default priority order, so ties —
    /// including the all-untested case where every rate is the optimistic
    /// 1.0 — keep Claude before Gemini before OpenAI.
    #[must_use]
    pub fn ranked_order(&self) -> Vec<ProviderId> {
        let mut order: Vec<ProviderId> = ProviderId::ALL
            .into_iter()
            .filter(|id| self.eligible(*id))
            .collect();
        order.sort_by(|a, b| {
            self.state(*b)
                .success_rate()
                .total_cmp(&self.state(*a).success_rate())
        });
        order
    }

    /// Attempt order for one generate call.
    ///
    /// An eligible preferred provider goes first, followed by the remaining
    /// eligible providers in the fixed default priority order. A missing or
    /// ineligible hint falls back to [`ScoreBoard::ranked_order`] — the hint
    /// is advisory, never an error.
    #[must_use]
    pub fn attempt_order(&self, preferred: Option<ProviderId>) -> Vec<ProviderId> {
        match preferred {
            Some(first) if self.eligible(first) => {
                let mut order = vec![first];
                order.extend(
                    ProviderId::ALL
                        .into_iter()
                        .filter(|id| *id != first && self.eligible(*id)),
                );
                order
            }
            _ => self.ranked_order(),
        }
    }

    /// The provider a caller should prefer right now: highest success rate
    /// among eligible providers, default-priority tie-break. `None` when no
    /// provider is eligible.
    #[must_use]
    pub fn recommended(&self) -> Option<ProviderId> {
        self.ranked_order().into_iter().next()
    }
}
