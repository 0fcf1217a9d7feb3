//! Travel estimates returned by the routing provider.

use serde::Serialize;

/// Duration and distance of one route at one departure time.
///
/// Produced once per candidate by the travel-estimate oracle and never
/// modified afterwards; weather adjustment produces a new duration rather
/// than mutating this value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TravelEstimate {
    pub duration_minutes: f64,
    pub distance_km: f64,
}

impl TravelEstimate {
    pub fn new(duration_minutes: f64, distance_km: f64) -> Self {
        Self {
            duration_minutes,
            distance_km,
        }
    }

    /// Build from the raw seconds/metres the routing provider reports.
    pub fn from_seconds_and_metres(seconds: f64, metres: f64) -> Self {
        Self::new(seconds / 60.0, metres / 1000.0)
    }
}
