//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate, NaiveDateTime, SubsecRound, Timelike};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::{Coordinates, DomainError, WeatherSignal};
use crate::planner::{OptimizeError, OptimizeRequest, Optimizer, validate_deadline};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/departure/plan", post(plan_departure))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Recommend when to leave to arrive by a deadline.
async fn plan_departure(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanDepartureResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanDepartureRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid plan request");
        AppError::InvalidInput {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let (deadline, mode) = req.parse()?;

    let now = Local::now().naive_local().trunc_subsecs(0);
    validate_deadline(&deadline, now)?;

    let (origin, destination) = tokio::try_join!(
        resolve_address(&state, &req.source),
        resolve_address(&state, &req.destination),
    )?;

    let optimizer = Optimizer::new(state.oracle.as_ref(), &state.config);
    optimizer
        .check_mode_distance(origin, destination, mode, now)
        .await?;

    let weather = fetch_weather(&state, origin, destination, now.date(), deadline.at()).await;

    info!(
        source = %req.source,
        destination = %req.destination,
        %deadline,
        %mode,
        "planning departure"
    );

    let request = OptimizeRequest::new(origin, destination, deadline, mode, weather);
    let recommendation = optimizer.recommend(&request, now).await?;

    let incidents = state
        .oracle
        .inner()
        .traffic_incidents(origin, destination)
        .await;

    Ok(Json(
        PlannedTrip {
            request: &req,
            deadline,
            mode,
            origin,
            destination,
            recommendation,
            incidents,
        }
        .into(),
    ))
}

/// Geocode an address within the configured region.
async fn resolve_address(state: &AppState, address: &str) -> Result<Coordinates, AppError> {
    let query = format!("{}, {}", address.trim(), state.region);
    state.geocoder.geocode(&query).await.map_err(|e| {
        warn!(%query, error = %e, "geocoding failed");
        AppError::AddressNotResolved {
            address: address.to_string(),
        }
    })
}

/// Forecasts at both ends of the trip for the deadline's hour, averaged.
async fn fetch_weather(
    state: &AppState,
    origin: Coordinates,
    destination: Coordinates,
    today: NaiveDate,
    deadline: NaiveDateTime,
) -> WeatherSignal {
    let hour = deadline.hour();
    let (at_origin, at_destination) = tokio::join!(
        state.weather.reading_at(origin, today, hour),
        state.weather.reading_at(destination, today, hour),
    );
    WeatherSignal::aggregate(&[at_origin, at_destination])
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    InvalidInput { message: String },
    AddressNotResolved { address: String },
    Optimize(OptimizeError),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::InvalidInput {
            message: e.to_string(),
        }
    }
}

impl From<OptimizeError> for AppError {
    fn from(e: OptimizeError) -> Self {
        AppError::Optimize(e)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AppError::AddressNotResolved { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Optimize(OptimizeError::InvalidDeadline) => StatusCode::BAD_REQUEST,
            AppError::Optimize(OptimizeError::TravelEstimateUnavailable(_)) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Optimize(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            AppError::InvalidInput { message } => ErrorResponse {
                error: "invalid_input",
                message: message.clone(),
                min_duration_minutes: None,
            },
            AppError::AddressNotResolved { address } => ErrorResponse {
                error: "address_not_resolved",
                message: format!("couldn't find coordinates for {address:?}"),
                min_duration_minutes: None,
            },
            AppError::Optimize(e) => ErrorResponse {
                error: e.code(),
                message: e.to_string(),
                min_duration_minutes: e.min_duration_minutes(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        if status.is_server_error() {
            error!(%status, error = body.error, message = %body.message, "request failed");
        } else {
            info!(%status, error = body.error, message = %body.message, "request rejected");
        }

        (status, Json(body)).into_response()
    }
}
