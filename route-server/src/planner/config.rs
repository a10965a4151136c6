//! Configuration for route search and route synthesis.

use rand::Rng;

use crate::matching::ThresholdPolicy;

/// Label given to a synthesized route when the catalog has no stops at all.
pub const DEFAULT_FALLBACK_LABEL: &str = "Destino Aleatório";

/// An inclusive range of stop counts to draw from uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopCount {
    min: usize,
    max: usize,
}

impl StopCount {
    /// Create a range; the bounds may be given in either order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Draw a count uniformly from the range.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> usize {
        rng.random_range(self.min..=self.max)
    }
}

/// Configuration parameters for the planner.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Threshold for resolving search text (keyword and journey mode).
    pub search_threshold: ThresholdPolicy,

    /// Threshold for resolving a route's destination text.
    /// More tolerant than search: authoring a route should rarely fail.
    pub destination_threshold: ThresholdPolicy,

    /// How many stops precede a resolved destination.
    pub lead_stops: StopCount,

    /// How many stops a route gets when its destination did not resolve.
    pub random_stops: StopCount,

    /// Destination label used when no stop could be drawn.
    pub fallback_label: String,
}

impl PlannerConfig {
    /// Set the search threshold policy.
    pub fn with_search_threshold(mut self, policy: ThresholdPolicy) -> Self {
        self.search_threshold = policy;
        self
    }

    /// Set the destination threshold policy.
    pub fn with_destination_threshold(mut self, policy: ThresholdPolicy) -> Self {
        self.destination_threshold = policy;
        self
    }

    /// Set the fallback destination label.
    pub fn with_fallback_label(mut self, label: impl Into<String>) -> Self {
        self.fallback_label = label.into();
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            search_threshold: ThresholdPolicy::SEARCH,
            destination_threshold: ThresholdPolicy::DESTINATION,
            lead_stops: StopCount::new(2, 4),
            random_stops: StopCount::new(3, 5),
            fallback_label: DEFAULT_FALLBACK_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.search_threshold, ThresholdPolicy::SEARCH);
        assert_eq!(config.destination_threshold, ThresholdPolicy::DESTINATION);
        assert_eq!((config.lead_stops.min(), config.lead_stops.max()), (2, 4));
        assert_eq!((config.random_stops.min(), config.random_stops.max()), (3, 5));
        assert_eq!(config.fallback_label, "Destino Aleatório");
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::default()
            .with_search_threshold(ThresholdPolicy::Fixed { limit: 2 })
            .with_destination_threshold(ThresholdPolicy::Fixed { limit: 5 })
            .with_fallback_label("Random");

        assert_eq!(config.search_threshold, ThresholdPolicy::Fixed { limit: 2 });
        assert_eq!(config.destination_threshold, ThresholdPolicy::Fixed { limit: 5 });
        assert_eq!(config.fallback_label, "Random");
    }

    #[test]
    fn stop_count_orders_bounds() {
        let count = StopCount::new(5, 3);
        assert_eq!(count.min(), 3);
        assert_eq!(count.max(), 5);
    }

    #[test]
    fn stop_count_draws_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let count = StopCount::new(2, 4);
        for _ in 0..200 {
            let n = count.draw(&mut rng);
            assert!((2..=4).contains(&n));
        }
        assert_eq!(StopCount::new(3, 3).draw(&mut rng), 3);
    }
}
