//! Failure classification — keyword triage of provider errors.
//!
//! Providers report failures as free-form text (HTTP bodies, transport
//! errors), so classification is case-insensitive substring containment
//! against two fixed keyword lists. No regex, no parsing: the lists are the
//! behavior, and downstream retry/exclusion decisions depend on them staying
//! exactly as documented.

/// Keywords that mark a billing / quota / subscription failure.
///
/// A match means the provider will keep failing until a human fixes the
/// account, so the provider is excluded until an explicit reset.
pub const QUOTA_MARKERS: [&str; 7] = [
    "credit balance",
    "insufficient credits",
    "quota exceeded",
    "billing",
    "payment required",
    "subscription",
    "usage limit",
];

/// Keywords that mark a temporary failure (rate limiting, timeouts,
/// connectivity, 5xx-style server trouble).
///
/// A match counts against the provider's failure total but leaves it
/// eligible for the next call.
pub const TRANSIENT_MARKERS: [&str; 8] = [
    "rate limit",
    "too many requests",
    "timeout",
    "connection error",
    "server error",
    "503",
    "502",
    "500",
];

/// Category of a single provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Billing/quota exhaustion. The provider is excluded until reset.
    Quota,
    /// Temporary trouble. The provider stays eligible for the next call.
    Transient,
    /// Unrecognized failure. Handled like [`FailureClass::Quota`]: excluding
    /// an unknown-broken provider beats hammering it.
    Unknown,
}

impl FailureClass {
    /// Whether this failure excludes the provider until an explicit reset.
    #[must_use]
    pub const fn excludes_provider(self) -> bool {
        !matches!(self, FailureClass::Transient)
    }

    /// Stable lowercase label for log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureClass::Quota => "quota",
            FailureClass::Transient => "transient",
            FailureClass::Unknown => "unknown",
        }
    }
}

/// Classify a provider failure by its error text.
///
/// Quota markers are checked before transient markers, so text matching both
/// lists ("billing server error") classifies as quota — the conservative
/// outcome.
#[must_use]
pub fn classify(error_text: &str) -> FailureClass {
    let lowered = error_text.to_lowercase();
    if QUOTA_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        FailureClass::Quota
    } else if TRANSIENT_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        FailureClass::Transient
    } else {
        FailureClass::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_markers_classify_as_quota() {
        for marker in QUOTA_MARKERS {
            assert_eq!(classify(marker), FailureClass::Quota, "marker: {marker}");
        }
    }

    #[test]
    fn transient_markers_classify_as_transient() {
        for marker in TRANSIENT_MARKERS {
            assert_eq!(
                classify(marker),
                FailureClass::Transient,
                "marker: {marker}"
            );
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            classify("Your CREDIT BALANCE is too low"),
            FailureClass::Quota
        );
        assert_eq!(classify("429 Too Many Requests"), FailureClass::Transient);
    }

    #[test]
    fn markers_match_inside_surrounding_text() {
        assert_eq!(
            classify("claude API error: HTTP 400: insufficient credits to complete request"),
            FailureClass::Quota
        );
        assert_eq!(
            classify("gemini API error: HTTP 503 Service Unavailable"),
            FailureClass::Transient
        );
    }

    #[test]
    fn quota_wins_when_both_lists_match() {
        assert_eq!(
            classify("billing backend returned 500 server error"),
            FailureClass::Quota
        );
    }

    #[test]
    fn unrecognized_text_is_unknown() {
        assert_eq!(classify("model produced no output"), FailureClass::Unknown);
        assert_eq!(classify(""), FailureClass::Unknown);
    }

    #[test]
    fn unknown_and_quota_exclude_transient_does_not() {
        assert!(FailureClass::Quota.excludes_provider());
        assert!(FailureClass::Unknown.excludes_provider());
        assert!(!FailureClass::Transient.excludes_provider());
    }
}
