//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CachedGeocoder, CachedOracle};
use crate::planner::OptimizerConfig;
use crate::providers::{TomTomClient, WeatherstackClient};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached TomTom routing client
    pub oracle: Arc<CachedOracle<TomTomClient>>,

    /// Cached TomTom geocoder
    pub geocoder: Arc<CachedGeocoder>,

    /// Weather forecasts
    pub weather: Arc<WeatherstackClient>,

    /// Departure optimizer configuration
    pub config: Arc<OptimizerConfig>,

    /// Region appended to geocoding queries, e.g. "Hyderabad, India"
    pub region: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        oracle: CachedOracle<TomTomClient>,
        geocoder: CachedGeocoder,
        weather: WeatherstackClient,
        config: OptimizerConfig,
        region: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            oracle: Arc::new(oracle),
            geocoder: Arc::new(geocoder),
            weather: Arc::new(weather),
            config: Arc::new(config),
            region: region.into(),
        }
    }
}
