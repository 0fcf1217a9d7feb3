//! Selection of the preferred and optimal departures.
//!
//! Given every evaluated candidate of a run, in ascending departure order:
//!
//! - **preferred** is the latest feasible departure, i.e. the one that lets
//!   the traveler leave as late as possible and still arrive on time;
//! - **optimal** is the feasible departure with the shortest adjusted travel
//!   time, earliest first on ties.
//!
//! The optimal departure is only reported when it saves at least the benefit
//! threshold over the preferred one.

use tracing::debug;

use crate::domain::Deadline;

use super::error::OptimizeError;
use super::evaluate::EvaluatedCandidate;

/// Outcome of selection over one run's candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub preferred: EvaluatedCandidate,

    /// `None` when the saving over `preferred` is below the threshold.
    pub optimal: Option<EvaluatedCandidate>,

    /// Preferred duration minus the fastest feasible duration (minutes).
    pub time_saving_minutes: f64,
}

/// Reduce evaluated candidates to a [`Selection`].
///
/// `candidates` must be in ascending `start_hour` order, as produced by the
/// sampler.
///
/// # Errors
///
/// - [`OptimizeError::EmptyWindow`] if `candidates` is empty.
/// - [`OptimizeError::NoFeasibleDeparture`] if no candidate is feasible,
///   carrying the shortest adjusted duration seen across all candidates and
///   the `deadline` they failed to meet.
pub fn select_departures(
    candidates: &[EvaluatedCandidate],
    deadline: &Deadline,
    benefit_threshold_mins: f64,
) -> Result<Selection, OptimizeError> {
    if candidates.is_empty() {
        return Err(OptimizeError::EmptyWindow);
    }

    let mut preferred: Option<&EvaluatedCandidate> = None;
    let mut fastest: Option<&EvaluatedCandidate> = None;

    for c in candidates.iter().filter(|c| c.is_feasible) {
        if preferred.is_none_or(|p| c.start_hour >= p.start_hour) {
            preferred = Some(c);
        }
        // Strict comparison keeps the earliest of equally fast departures.
        if fastest.is_none_or(|f| c.adjusted_duration_minutes < f.adjusted_duration_minutes) {
            fastest = Some(c);
        }
    }

    let (Some(preferred), Some(fastest)) = (preferred, fastest) else {
        let min_duration_minutes = candidates
            .iter()
            .map(|c| c.adjusted_duration_minutes)
            .fold(f64::INFINITY, f64::min);
        return Err(OptimizeError::NoFeasibleDeparture {
            min_duration_minutes,
            arrive_by: deadline.time_hhmm(),
        });
    };

    let time_saving_minutes =
        preferred.adjusted_duration_minutes - fastest.adjusted_duration_minutes;
    let optimal = (time_saving_minutes >= benefit_threshold_mins).then_some(*fastest);

    debug!(
        preferred = preferred.start_hour,
        fastest = fastest.start_hour,
        time_saving_minutes,
        optimal_reported = optimal.is_some(),
        "selected departures"
    );

    Ok(Selection {
        preferred: *preferred,
        optimal,
        time_saving_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 2.0;

    fn deadline() -> Deadline {
        Deadline::parse("2024-03-15", "09:15").unwrap()
    }

    fn candidate(start_hour: f64, duration: f64, feasible: bool) -> EvaluatedCandidate {
        EvaluatedCandidate {
            start_hour,
            adjusted_duration_minutes: duration,
            distance_km: 10.0,
            arrival_hour: start_hour + duration / 60.0,
            is_feasible: feasible,
        }
    }

    #[test]
    fn preferred_is_latest_feasible_regardless_of_duration() {
        let candidates = [
            candidate(8.0, 20.0, true),
            candidate(8.5, 15.0, true),
            candidate(9.0, 10.0, true),
        ];

        let selection = select_departures(&candidates, &deadline(), THRESHOLD).unwrap();
        assert_eq!(selection.preferred.start_hour, 9.0);
    }

    #[test]
    fn preferred_skips_trailing_infeasible_candidates() {
        let candidates = [
            candidate(8.0, 20.0, true),
            candidate(8.5, 25.0, true),
            candidate(9.0, 30.0, false),
        ];

        let selection = select_departures(&candidates, &deadline(), THRESHOLD).unwrap();
        assert_eq!(selection.preferred.start_hour, 8.5);
        assert_eq!(selection.optimal.unwrap().start_hour, 8.0);
        assert_eq!(selection.time_saving_minutes, 5.0);
    }

    #[test]
    fn optimal_suppressed_below_threshold() {
        let candidates = [candidate(8.0, 19.0, true), candidate(8.5, 20.0, true)];

        let selection = select_departures(&candidates, &deadline(), THRESHOLD).unwrap();
        assert_eq!(selection.preferred.start_hour, 8.5);
        assert_eq!(selection.time_saving_minutes, 1.0);
        assert!(selection.optimal.is_none());
    }

    #[test]
    fn optimal_reported_above_threshold() {
        let candidates = [candidate(8.0, 17.0, true), candidate(8.5, 20.0, true)];

        let selection = select_departures(&candidates, &deadline(), THRESHOLD).unwrap();
        let optimal = selection.optimal.unwrap();
        assert_eq!(optimal.start_hour, 8.0);
        assert_eq!(optimal.adjusted_duration_minutes, 17.0);
        assert_eq!(selection.time_saving_minutes, 3.0);
    }

    #[test]
    fn optimal_reported_at_exact_threshold() {
        let candidates = [candidate(8.0, 18.0, true), candidate(8.5, 20.0, true)];
        let selection = select_departures(&candidates, &deadline(), THRESHOLD).unwrap();
        assert!(selection.optimal.is_some());
    }

    #[test]
    fn optimal_ties_go_to_earliest() {
        let candidates = [
            candidate(8.0, 25.0, true),
            candidate(8.25, 15.0, true),
            candidate(8.5, 15.0, true),
            candidate(8.75, 22.0, true),
        ];

        let selection = select_departures(&candidates, &deadline(), THRESHOLD).unwrap();
        assert_eq!(selection.optimal.unwrap().start_hour, 8.25);
    }

    #[test]
    fn optimal_ignores_infeasible_faster_candidates() {
        let candidates = [
            candidate(8.0, 5.0, false),
            candidate(8.5, 20.0, true),
            candidate(8.75, 24.0, true),
        ];

        let selection = select_departures(&candidates, &deadline(), THRESHOLD).unwrap();
        assert_eq!(selection.optimal.unwrap().start_hour, 8.5);
        assert_eq!(selection.time_saving_minutes, 4.0);
    }

    #[test]
    fn single_feasible_candidate_is_both() {
        let candidates = [candidate(8.5, 20.0, true), candidate(9.0, 20.0, false)];
        let selection = select_departures(&candidates, &deadline(), THRESHOLD).unwrap();

        assert_eq!(selection.preferred.start_hour, 8.5);
        assert_eq!(selection.time_saving_minutes, 0.0);
        assert!(selection.optimal.is_none());
    }

    #[test]
    fn no_feasible_reports_global_minimum() {
        let candidates = [
            candidate(8.0, 75.0, false),
            candidate(8.5, 70.0, false),
            candidate(9.0, 72.0, false),
        ];

        let err = select_departures(&candidates, &deadline(), THRESHOLD).unwrap_err();
        match err {
            OptimizeError::NoFeasibleDeparture {
                min_duration_minutes,
                arrive_by,
            } => {
                assert_eq!(min_duration_minutes, 70.0);
                assert_eq!(arrive_by, "09:15");
            }
            other => panic!("expected NoFeasibleDeparture, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_empty_window() {
        let err = select_departures(&[], &deadline(), THRESHOLD).unwrap_err();
        assert!(matches!(err, OptimizeError::EmptyWindow));
    }
}
