//! Caching layer for provider responses.
//!
//! One optimization run asks the routing provider for every sampled
//! departure, and repeated requests for the same trip ask for the same
//! departures again. Route estimates are cached per (origin, destination,
//! departure minute, mode); geocoding results per query string.
//!
//! Only successes are cached, so a transient provider failure is retried on
//! the next request.

use std::time::Duration;

use chrono::NaiveDateTime;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Coordinates, TravelEstimate, TravelMode};
use crate::planner::{OracleError, TravelEstimateOracle};
use crate::providers::{ProviderError, TomTomClient};

/// Cache key for route estimates.
type RouteKey = (Coordinates, Coordinates, NaiveDateTime, TravelMode);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries, per cache.
    pub max_capacity: u64,

    /// TTL for cached entries. `None` keeps entries until evicted by size.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 128,
            ttl: None,
        }
    }
}

impl CacheConfig {
    fn build<K, V>(&self) -> MokaCache<K, V>
    where
        K: std::hash::Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let builder = MokaCache::builder().max_capacity(self.max_capacity);
        match self.ttl {
            Some(ttl) => builder.time_to_live(ttl).build(),
            None => builder.build(),
        }
    }
}

/// Travel estimate oracle with caching.
///
/// Wraps any oracle and memoizes its successful answers.
pub struct CachedOracle<O> {
    inner: O,
    routes: MokaCache<RouteKey, TravelEstimate>,
}

impl<O: TravelEstimateOracle> CachedOracle<O> {
    /// Create a new cached oracle.
    pub fn new(inner: O, config: &CacheConfig) -> Self {
        Self {
            inner,
            routes: config.build(),
        }
    }

    /// Access the underlying oracle for operations that bypass cache.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<O: TravelEstimateOracle> TravelEstimateOracle for CachedOracle<O> {
    async fn estimate_travel(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        depart_at: NaiveDateTime,
        mode: TravelMode,
    ) -> Result<TravelEstimate, OracleError> {
        let key = (origin, destination, depart_at, mode);

        if let Some(cached) = self.routes.get(&key).await {
            trace!(%depart_at, %mode, "route cache hit");
            return Ok(cached);
        }

        trace!(%depart_at, %mode, "route cache miss");
        let estimate = self
            .inner
            .estimate_travel(origin, destination, depart_at, mode)
            .await?;

        self.routes.insert(key, estimate).await;
        Ok(estimate)
    }
}

/// TomTom geocoder with caching.
pub struct CachedGeocoder {
    client: TomTomClient,
    results: MokaCache<String, Coordinates>,
}

impl CachedGeocoder {
    /// Create a new cached geocoder.
    pub fn new(client: TomTomClient, config: &CacheConfig) -> Self {
        Self {
            client,
            results: config.build(),
        }
    }

    /// Resolve `query` to coordinates, using cache if available.
    pub async fn geocode(&self, query: &str) -> Result<Coordinates, ProviderError> {
        if let Some(cached) = self.results.get(query).await {
            trace!(query, "geocode cache hit");
            return Ok(cached);
        }

        let coords = self.client.geocode(query).await?;
        self.results.insert(query.to_string(), coords).await;
        Ok(coords)
    }
}
