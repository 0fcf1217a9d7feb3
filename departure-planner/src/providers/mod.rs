//! HTTP clients for the external services the planner depends on.
//!
//! - [`tomtom`]: geocoding, traffic-aware routing and traffic incidents.
//!   [`TomTomClient`] is the production [`TravelEstimateOracle`].
//! - [`weatherstack`]: hourly forecasts used for the weather adjustment.
//!
//! [`TravelEstimateOracle`]: crate::planner::TravelEstimateOracle

mod error;
pub mod tomtom;
pub mod weatherstack;

pub use error::ProviderError;
pub use tomtom::{TomTomClient, TomTomConfig};
pub use weatherstack::{WeatherstackClient, WeatherstackConfig};
