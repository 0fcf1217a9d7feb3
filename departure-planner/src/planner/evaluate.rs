//! Feasibility evaluation of sampled departures.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{TravelEstimate, TravelMode, WeatherSignal};

use super::sample::Candidate;
use super::weather::adjust_duration;

/// A candidate with its weather-adjusted travel time and arrival.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatedCandidate {
    pub start_hour: f64,
    pub adjusted_duration_minutes: f64,
    pub distance_km: f64,
    pub arrival_hour: f64,
    pub is_feasible: bool,
}

/// Everything about a run that feasibility depends on, besides the candidate.
#[derive(Debug, Clone, Copy)]
pub struct FeasibilityContext {
    /// Date the candidate offsets are relative to.
    pub date: NaiveDate,

    /// Deadline as fractional hours on `date`.
    pub deadline_hour: f64,

    /// Allowed lateness in fractional hours.
    pub slack_hours: f64,

    /// The current instant. Departures before it are never feasible.
    pub now: NaiveDateTime,

    pub mode: TravelMode,
    pub weather: WeatherSignal,
}

/// Whether an arrival at `arrival_hour` meets `deadline_hour` given `slack_hours`.
///
/// The comparison is inclusive: arriving exactly at the slack boundary counts.
pub fn arrives_in_time(arrival_hour: f64, deadline_hour: f64, slack_hours: f64) -> bool {
    arrival_hour <= deadline_hour + slack_hours
}

impl FeasibilityContext {
    /// Evaluate one candidate against its (raw) travel estimate.
    pub fn evaluate(&self, candidate: Candidate, estimate: TravelEstimate) -> EvaluatedCandidate {
        let adjusted = adjust_duration(
            estimate.duration_minutes,
            self.weather.precipitation,
            self.mode,
        );
        let start_hour = candidate.start_hour();
        let arrival_hour = start_hour + adjusted / 60.0;

        let on_time = arrives_in_time(arrival_hour, self.deadline_hour, self.slack_hours);
        let not_departed = candidate.start_instant(self.date) >= self.now;

        EvaluatedCandidate {
            start_hour,
            adjusted_duration_minutes: adjusted,
            distance_km: estimate.distance_km,
            arrival_hour,
            is_feasible: on_time && not_departed,
        }
    }
}
