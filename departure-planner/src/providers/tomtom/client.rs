//! TomTom HTTP client.
//!
//! Geocoding, traffic-aware routing and traffic incidents. TomTom
//! authenticates with a `key` query parameter on every request.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::{BoundingBox, Coordinates, TravelEstimate, TravelMode};
use crate::planner::{OracleError, TravelEstimateOracle};
use crate::providers::error::ProviderError;

use super::types::{GeocodeResponse, IncidentsResponse, RouteResponse};

/// Default base URL for the TomTom APIs.
const DEFAULT_BASE_URL: &str = "https://api.tomtom.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Degrees added on every side of the incident search box.
const INCIDENT_BBOX_PADDING: f64 = 0.05;

/// Configuration for the TomTom client.
#[derive(Debug, Clone)]
pub struct TomTomConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production TomTom)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TomTomConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// TomTom API client.
///
/// Uses a semaphore to limit concurrent requests, since one optimization run
/// issues a routing request per sampled departure all at once.
#[derive(Debug, Clone)]
pub struct TomTomClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl TomTomClient {
    /// Create a new TomTom client with the given configuration.
    pub fn new(config: TomTomConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Resolve a free-text address to coordinates.
    ///
    /// Returns [`ProviderError::NotFound`] if the geocoder has no result.
    pub async fn geocode(&self, query: &str) -> Result<Coordinates, ProviderError> {
        let url = self.geocode_url(query)?;
        let resp: GeocodeResponse = self
            .get_json(url.as_str(), &[("key", self.api_key.clone()), ("limit", "1".into())])
            .await?;

        let Some(first) = resp.results.first() else {
            return Err(ProviderError::NotFound(format!("no geocoding result for {query:?}")));
        };

        let coords = Coordinates::new(first.position.lat, first.position.lon).map_err(|e| {
            ProviderError::Json {
                message: e.to_string(),
                body: None,
            }
        })?;

        debug!(query, %coords, "geocoded");
        Ok(coords)
    }

    /// Traffic-aware route summary for one departure time.
    pub async fn route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        depart_at: NaiveDateTime,
        mode: TravelMode,
    ) -> Result<TravelEstimate, ProviderError> {
        let url = format!(
            "{}/routing/1/calculateRoute/{}:{}/json",
            self.base_url, origin, destination
        );

        let resp: RouteResponse = self
            .get_json(
                &url,
                &[
                    ("key", self.api_key.clone()),
                    ("traffic", "true".into()),
                    ("departAt", format_depart_at(depart_at)),
                    ("travelMode", mode.as_str().into()),
                ],
            )
            .await?;

        let Some(route) = resp.routes.first() else {
            return Err(ProviderError::NotFound(format!(
                "no {mode} route from {origin} to {destination}"
            )));
        };

        let estimate = TravelEstimate::from_seconds_and_metres(
            route.summary.travel_time_in_seconds,
            route.summary.length_in_meters,
        );

        debug!(
            %origin,
            %destination,
            %depart_at,
            %mode,
            duration_minutes = estimate.duration_minutes,
            distance_km = estimate.distance_km,
            "route"
        );
        Ok(estimate)
    }

    /// Descriptions of traffic incidents around the trip.
    ///
    /// This is advisory only: any failure is logged and gives an empty list.
    pub async fn traffic_incidents(&self, a: Coordinates, b: Coordinates) -> Vec<String> {
        match self.fetch_incidents(a, b).await {
            Ok(incidents) => incidents,
            Err(e) => {
                warn!(error = %e, "traffic incidents unavailable");
                Vec::new()
            }
        }
    }

    async fn fetch_incidents(
        &self,
        a: Coordinates,
        b: Coordinates,
    ) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/traffic/services/4/incidentDetails", self.base_url);
        let bbox = BoundingBox::around(a, b, INCIDENT_BBOX_PADDING);

        let resp: IncidentsResponse = self
            .get_json(
                &url,
                &[
                    ("key", self.api_key.clone()),
                    ("bbox", bbox.to_string()),
                    ("fields", "{incidents{description}}".into()),
                    ("language", "en-GB".into()),
                ],
            )
            .await?;

        Ok(resp.traffic_descriptions())
    }

    fn geocode_url(&self, query: &str) -> Result<reqwest::Url, ProviderError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| ProviderError::Api {
            status: 0,
            message: format!("invalid base URL: {e}"),
        })?;

        let file = format!("{query}.json");
        url.path_segments_mut()
            .map_err(|_| ProviderError::Api {
                status: 0,
                message: "base URL cannot take a path".to_string(),
            })?
            .pop_if_empty()
            .extend(["search", "2", "geocode", file.as_str()]);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self.http.get(url).query(query).send().await?;
        let response = ProviderError::check_status(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ProviderError::json(e, &body))
    }
}

impl TravelEstimateOracle for TomTomClient {
    async fn estimate_travel(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        depart_at: NaiveDateTime,
        mode: TravelMode,
    ) -> Result<TravelEstimate, OracleError> {
        Ok(self.route(origin, destination, depart_at, mode).await?)
    }
}

/// Local departure time in the form the routing API expects.
fn format_depart_at(depart_at: NaiveDateTime) -> String {
    depart_at.format("%Y-%m-%dT%H:%M:%S").to_string()
}
