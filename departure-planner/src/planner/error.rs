//! Optimizer error types.
//!
//! Every variant is a condition the traveler can act on (pick another
//! deadline, another mode, try again later). The messages are written to be
//! shown to them directly.

use crate::domain::TravelMode;

/// Why no departure could be recommended.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimizeError {
    /// The deadline has already passed.
    #[error("arrival time must be in the future")]
    InvalidDeadline,

    /// The baseline route is too long for a distance-limited mode.
    #[error("distance ({distance_km:.1} km) too far for {mode}; max {limit_km:.0} km")]
    ModeDistanceExceeded {
        distance_km: f64,
        mode: TravelMode,
        limit_km: f64,
    },

    /// No departure times fit between now and the deadline.
    #[error("no valid start times available; try a later arrival")]
    EmptyWindow,

    /// Every sampled departure arrives too late.
    #[error(
        "travel takes {min_duration_minutes:.1} min, too long to reach by {arrive_by}; try a later arrival"
    )]
    NoFeasibleDeparture {
        min_duration_minutes: f64,

        /// Deadline time (HH:MM)
        arrive_by: String,
    },

    /// The routing provider failed for at least one candidate.
    #[error("error fetching travel time: {0}")]
    TravelEstimateUnavailable(String),
}

impl OptimizeError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            OptimizeError::InvalidDeadline => "invalid_deadline",
            OptimizeError::ModeDistanceExceeded { .. } => "mode_distance_exceeded",
            OptimizeError::EmptyWindow => "empty_window",
            OptimizeError::NoFeasibleDeparture { .. } => "no_feasible_departure",
            OptimizeError::TravelEstimateUnavailable(_) => "travel_estimate_unavailable",
        }
    }

    /// The shortest duration observed, where the failure carries one.
    pub fn min_duration_minutes(&self) -> Option<f64> {
        match self {
            OptimizeError::NoFeasibleDeparture {
                min_duration_minutes,
                ..
            } => Some(*min_duration_minutes),
            _ => None,
        }
    }
}
