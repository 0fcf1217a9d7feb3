//! Arrival-constrained departure optimization.
//!
//! Samples departure times in a window before the deadline, asks the travel
//! estimate oracle how long each would take, adjusts for the weather, and
//! picks the latest feasible departure plus, when it is meaningfully faster,
//! the fastest one.

use std::future::Future;

use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::domain::{Coordinates, Deadline, TravelEstimate, TravelMode, WeatherSignal};

use super::config::OptimizerConfig;
use super::error::OptimizeError;
use super::evaluate::FeasibilityContext;
use super::result::Recommendation;
use super::sample::{Candidate, TimeWindow};
use super::select::select_departures;

/// Error from a travel estimate oracle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct OracleError(pub String);

/// Source of travel-time estimates.
///
/// This abstraction allows the optimizer to be tested without a routing
/// provider, and lets callers add caching in front of one.
pub trait TravelEstimateOracle: Send + Sync {
    /// Estimate the trip from `origin` to `destination` leaving at `depart_at`.
    fn estimate_travel(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        depart_at: NaiveDateTime,
        mode: TravelMode,
    ) -> impl Future<Output = Result<TravelEstimate, OracleError>> + Send;
}

/// Request for departure optimization.
#[derive(Debug, Clone)]
pub struct OptimizeRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub deadline: Deadline,
    pub mode: TravelMode,

    /// Aggregated weather for the run.
    pub weather: WeatherSignal,
}

impl OptimizeRequest {
    /// Create a new request.
    pub fn new(
        origin: Coordinates,
        destination: Coordinates,
        deadline: Deadline,
        mode: TravelMode,
        weather: WeatherSignal,
    ) -> Self {
        Self {
            origin,
            destination,
            deadline,
            mode,
            weather,
        }
    }
}

/// Reject deadlines that have already passed.
pub fn validate_deadline(deadline: &Deadline, now: NaiveDateTime) -> Result<(), OptimizeError> {
    if deadline.is_before(now) {
        return Err(OptimizeError::InvalidDeadline);
    }
    Ok(())
}

/// Departure optimizer.
pub struct Optimizer<'a, O: TravelEstimateOracle> {
    oracle: &'a O,
    config: &'a OptimizerConfig,
}

impl<'a, O: TravelEstimateOracle> Optimizer<'a, O> {
    /// Create a new optimizer.
    pub fn new(oracle: &'a O, config: &'a OptimizerConfig) -> Self {
        Self { oracle, config }
    }

    /// Recommend departures for `request`, as of `now`.
    ///
    /// Runs the distance check for the requested mode and then
    /// [`recommend`](Self::recommend). Callers that gather the weather
    /// themselves can call the two steps separately, so a trip that is too
    /// long is rejected before any forecast is fetched.
    pub async fn optimize(
        &self,
        request: &OptimizeRequest,
        now: NaiveDateTime,
    ) -> Result<Recommendation, OptimizeError> {
        validate_deadline(&request.deadline, now)?;
        self.check_mode_distance(request.origin, request.destination, request.mode, now)
            .await?;
        self.recommend(request, now).await
    }

    /// Sample, estimate, evaluate and select, without the distance check.
    ///
    /// `now` is truncated to whole seconds, the resolution candidates are
    /// sampled at, so departing exactly now is feasible.
    ///
    /// All oracle calls for a run are issued concurrently; selection only
    /// starts once every one of them has completed, and the first failure
    /// aborts the run.
    pub async fn recommend(
        &self,
        request: &OptimizeRequest,
        now: NaiveDateTime,
    ) -> Result<Recommendation, OptimizeError> {
        let now = now.trunc_subsecs(0);
        validate_deadline(&request.deadline, now)?;

        let window = TimeWindow::before_deadline(&request.deadline, now, self.config.window());
        let candidates = window.candidates(self.config.step());
        if candidates.is_empty() {
            return Err(OptimizeError::EmptyWindow);
        }

        info!(
            deadline = %request.deadline,
            mode = %request.mode,
            earliest = window.earliest_start(),
            latest = window.latest_start(),
            candidates = candidates.len(),
            precipitation = request.weather.precipitation,
            "optimizing departure"
        );

        let estimates = self
            .estimate_all(request, window.date(), &candidates)
            .await?;

        let context = FeasibilityContext {
            date: window.date(),
            deadline_hour: request.deadline.hour(),
            slack_hours: self.config.arrival_slack_hours(),
            now,
            mode: request.mode,
            weather: request.weather,
        };

        let evaluated: Vec<_> = candidates
            .iter()
            .zip(estimates)
            .map(|(candidate, estimate)| context.evaluate(*candidate, estimate))
            .collect();

        debug!(
            feasible = evaluated.iter().filter(|c| c.is_feasible).count(),
            total = evaluated.len(),
            "evaluated candidates"
        );

        let selection = select_departures(
            &evaluated,
            &request.deadline,
            self.config.benefit_threshold_mins,
        )?;

        Ok(Recommendation {
            result: selection.into(),
            weather: request.weather,
        })
    }

    /// Reject trips too long for a distance-limited mode.
    ///
    /// The distance comes from a car route leaving now, not a route for the
    /// requested mode at the requested time. If that baseline route is
    /// unavailable the check is skipped.
    pub async fn check_mode_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        mode: TravelMode,
        now: NaiveDateTime,
    ) -> Result<(), OptimizeError> {
        if !mode.is_distance_limited() {
            return Ok(());
        }

        let depart_at = now.trunc_subsecs(0);
        let baseline = match self
            .oracle
            .estimate_travel(origin, destination, depart_at, TravelMode::Car)
            .await
        {
            Ok(estimate) => estimate,
            Err(e) => {
                warn!(error = %e, "baseline route unavailable, skipping distance check");
                return Ok(());
            }
        };

        if baseline.distance_km > self.config.max_distance_km {
            return Err(OptimizeError::ModeDistanceExceeded {
                distance_km: baseline.distance_km,
                mode,
                limit_km: self.config.max_distance_km,
            });
        }

        Ok(())
    }

    /// Fetch estimates for every candidate, in candidate order.
    async fn estimate_all(
        &self,
        request: &OptimizeRequest,
        date: NaiveDate,
        candidates: &[Candidate],
    ) -> Result<Vec<TravelEstimate>, OptimizeError> {
        let calls = candidates.iter().map(|c| {
            self.oracle.estimate_travel(
                request.origin,
                request.destination,
                c.depart_at(date),
                request.mode,
            )
        });

        try_join_all(calls).await.map_err(|e| {
            warn!(error = %e, "travel estimate failed, aborting run");
            OptimizeError::TravelEstimateUnavailable(e.to_string())
        })
    }
}
