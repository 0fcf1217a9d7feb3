//! Weatherstack HTTP client.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::{Coordinates, WeatherReading};
use crate::providers::error::ProviderError;

use super::types::ForecastResponse;

/// Default base URL for the Weatherstack API.
const DEFAULT_BASE_URL: &str = "http://api.weatherstack.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 2;

/// Configuration for the Weatherstack client.
#[derive(Debug, Clone)]
pub struct WeatherstackConfig {
    /// API key, sent as the `access_key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WeatherstackConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 15,
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

/// Weatherstack forecast client.
#[derive(Debug, Clone)]
pub struct WeatherstackClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl WeatherstackClient {
    /// Create a new Weatherstack client with the given configuration.
    pub fn new(config: WeatherstackConfig) -> Result<Self, ProviderError> {
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

    /// Fetch today's hourly forecast for a point.
    pub async fn forecast(&self, point: Coordinates) -> Result<ForecastResponse, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/forecast", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("access_key", self.api_key.clone()),
                ("query", point.to_string()),
                ("forecast_days", "1".to_string()),
                ("hourly", "1".to_string()),
            ])
            .send()
            .await?;

        let response = ProviderError::check_status(response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ProviderError::json(e, &body))
    }

    /// The forecast reading at `point` for `today`, nearest to `hour`.
    ///
    /// Never fails: when the provider errors or has no entry for `today`,
    /// [`WeatherReading::FALLBACK`] is returned.
    pub async fn reading_at(
        &self,
        point: Coordinates,
        today: NaiveDate,
        hour: u32,
    ) -> WeatherReading {
        match self.forecast(point).await {
            Ok(resp) => match resp.reading_at(today, hour) {
                Some(reading) => {
                    debug!(%point, hour, ?reading, "weather reading");
                    reading
                }
                None => {
                    warn!(%point, %today, "no forecast for today, using fallback weather");
                    WeatherReading::FALLBACK
                }
            },
            Err(e) => {
                warn!(%point, error = %e, "weather fetch failed, using fallback weather");
                WeatherReading::FALLBACK
            }
        }
    }
}
