//! Configuration for the departure optimizer.

use chrono::Duration;

/// Tuning parameters for departure optimization.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// How far before the deadline to start sampling departures (minutes).
    pub window_mins: i64,

    /// Spacing between sampled departure times (minutes).
    pub step_mins: i64,

    /// Allowed lateness at the deadline (minutes).
    /// Absorbs sampling granularity at the boundary.
    pub arrival_slack_mins: i64,

    /// Minimum saving (minutes) before the fastest departure is reported
    /// separately from the latest one.
    pub benefit_threshold_mins: f64,

    /// Maximum baseline route length for distance-limited modes (km).
    pub max_distance_km: f64,
}

impl OptimizerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        window_mins: i64,
        step_mins: i64,
        arrival_slack_mins: i64,
        benefit_threshold_mins: f64,
        max_distance_km: f64,
    ) -> Self {
        Self {
            window_mins,
            step_mins,
            arrival_slack_mins,
            benefit_threshold_mins,
            max_distance_km,
        }
    }

    /// Returns the sampling window as a Duration.
    pub fn window(&self) -> Duration {
        Duration::minutes(self.window_mins)
    }

    /// Returns the sampling step as a Duration.
    pub fn step(&self) -> Duration {
        Duration::minutes(self.step_mins)
    }

    /// Arrival slack expressed in fractional hours.
    pub fn arrival_slack_hours(&self) -> f64 {
        self.arrival_slack_mins as f64 / 60.0
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            window_mins: 60,
            step_mins: 5,
            arrival_slack_mins: 1,
            benefit_threshold_mins: 2.0,
            max_distance_km: 10.0,
        }
    }
}
