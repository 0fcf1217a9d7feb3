//! Packaging of the final recommendation.

use serde::Serialize;

use crate::domain::{WeatherSignal, format_hour};

use super::evaluate::EvaluatedCandidate;
use super::select::Selection;

/// One recommended departure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepartureOption {
    pub start_hour: f64,
    pub duration_minutes: f64,
    pub distance_km: f64,
}

impl DepartureOption {
    /// The departure time as "HH:MM".
    pub fn start_time(&self) -> String {
        format_hour(self.start_hour)
    }
}

impl From<EvaluatedCandidate> for DepartureOption {
    fn from(c: EvaluatedCandidate) -> Self {
        Self {
            start_hour: c.start_hour,
            duration_minutes: c.adjusted_duration_minutes,
            distance_km: c.distance_km,
        }
    }
}

/// The optimizer's answer for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimizationResult {
    /// Latest departure that still arrives on time.
    pub preferred: DepartureOption,

    /// Fastest departure, present only when it beats `preferred` by at least
    /// the benefit threshold.
    pub optimal: Option<DepartureOption>,

    pub time_saving_minutes: f64,
}

impl From<Selection> for OptimizationResult {
    fn from(s: Selection) -> Self {
        Self {
            preferred: s.preferred.into(),
            optimal: s.optimal.map(DepartureOption::from),
            time_saving_minutes: s.time_saving_minutes,
        }
    }
}

/// A result together with the weather it was computed under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub result: OptimizationResult,
    pub weather: WeatherSignal,
}
