//! Configuration for the split-ticket planner.

use chrono::Duration;

/// Configuration parameters for split-ticket search.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Minimum connecting layover at the stop airport (minutes).
    /// Connections tighter than this are rejected.
    pub min_layover_mins: i64,

    /// Maximum connecting layover at the stop airport (minutes).
    /// Longer waits are rejected. The interval is closed at both ends.
    pub max_layover_mins: i64,

    /// Maximum number of provider calls to run in parallel during a
    /// fan-out stage. Higher values increase parallelism but risk
    /// provider rate limits.
    pub batch_size: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(min_layover_mins: i64, max_layover_mins: i64, batch_size: usize) -> Self {
        Self {
            min_layover_mins,
            max_layover_mins,
            batch_size,
        }
    }

    /// Returns the minimum layover as a Duration.
    pub fn min_layover(&self) -> Duration {
        Duration::minutes(self.min_layover_mins)
    }

    /// Returns the maximum layover as a Duration.
    pub fn max_layover(&self) -> Duration {
        Duration::minutes(self.max_layover_mins)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_layover_mins: 180, // 3 hours
            max_layover_mins: 360, // 6 hours
            batch_size: 8,
        }
    }
}
