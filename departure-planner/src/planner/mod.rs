//! Departure optimizer.
//!
//! This module implements the core algorithm that answers: "when is the
//! latest I can leave and still arrive by my deadline, and is there a
//! noticeably faster time to go?"
//!
//! The pipeline is sample → estimate → adjust for weather → evaluate
//! feasibility → select. Nothing here talks to the network; travel estimates
//! come from a caller-supplied [`TravelEstimateOracle`].

mod config;
mod error;
mod evaluate;
mod optimize;
mod result;
mod sample;
mod select;
mod weather;


pub use config::OptimizerConfig;
pub use error::OptimizeError;
pub use evaluate::{EvaluatedCandidate, FeasibilityContext, arrives_in_time};
pub use optimize::{
    OptimizeRequest, Optimizer, OracleError, TravelEstimateOracle, validate_deadline,
};
pub use result::{DepartureOption, OptimizationResult, Recommendation};
pub use sample::{Candidate, TimeWindow};
pub use select::{Selection, select_departures};
pub use weather::{PRECIPITATION_THRESHOLD, adjust_duration, weather_factor};
