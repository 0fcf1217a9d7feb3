use departure_planner::cache::{CacheConfig, CachedGeocoder, CachedOracle};
use departure_planner::config::AppConfig;
use departure_planner::planner::OptimizerConfig;
use departure_planner::providers::{
    TomTomClient, TomTomConfig, WeatherstackClient, WeatherstackConfig,
};
use departure_planner::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "departure_planner=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // One TomTom client serves routing, geocoding and incidents
    let tomtom = TomTomClient::new(TomTomConfig::new(&config.tomtom_api_key))
        .expect("Failed to create TomTom client");
    let weather = WeatherstackClient::new(WeatherstackConfig::new(&config.weatherstack_api_key))
        .expect("Failed to create Weatherstack client");

    let cache_config = CacheConfig::default();
    let oracle = CachedOracle::new(tomtom.clone(), &cache_config);
    let geocoder = CachedGeocoder::new(tomtom, &cache_config);

    let state = AppState::new(
        oracle,
        geocoder,
        weather,
        OptimizerConfig::default(),
        config.region.as_str(),
    );

    let app = create_router(state);

    info!(addr = %config.addr, region = %config.region, "departure planner listening");
    info!("  GET  /health          - Health check");
    info!("  POST /departure/plan  - Plan a departure");

    let listener = tokio::net::TcpListener::bind(config.addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
