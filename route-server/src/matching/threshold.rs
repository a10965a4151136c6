//! Acceptance thresholds for fuzzy matches.

use serde::{Deserialize, Serialize};

/// Decides whether an edit distance is close enough to accept a fuzzy match,
/// as a function of the query length.
///
/// A match is accepted when `distance < threshold(query_len)`. Thresholds
/// involve `query_len / 2` as a real number, so comparisons are done in
/// half-units to stay exact: `2 * distance < 2 * threshold`.
///
/// Route search and destination resolution deliberately tolerate different
/// error rates, so the policy is always chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdPolicy {
    /// `max(floor, len / 2)`; keyword and journey search.
    HalfLengthWithFloor { floor: usize },
    /// `len / 2 + slack`; destination resolution when authoring routes.
    HalfLengthPlus { slack: usize },
    /// A constant threshold regardless of query length.
    Fixed { limit: usize },
}

impl ThresholdPolicy {
    /// The policy used by route search: `max(3, len / 2)`.
    pub const SEARCH: Self = Self::HalfLengthWithFloor { floor: 3 };

    /// The policy used when resolving a route's destination: `len / 2 + 3`.
    pub const DESTINATION: Self = Self::HalfLengthPlus { slack: 3 };

    /// Twice the threshold for a query of `query_len` characters.
    fn doubled_limit(&self, query_len: usize) -> usize {
        match *self {
            Self::HalfLengthWithFloor { floor } => floor.saturating_mul(2).max(query_len),
            Self::HalfLengthPlus { slack } => query_len.saturating_add(slack.saturating_mul(2)),
            Self::Fixed { limit } => limit.saturating_mul(2),
        }
    }

    /// The threshold as a real number, for display and logging.
    pub fn threshold(&self, query_len: usize) -> f64 {
        self.doubled_limit(query_len) as f64 / 2.0
    }

    /// Whether `distance` is strictly below the threshold for this query length.
    pub fn accepts(&self, distance: usize, query_len: usize) -> bool {
        distance.saturating_mul(2) < self.doubled_limit(query_len)
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::SEARCH
    }
}
