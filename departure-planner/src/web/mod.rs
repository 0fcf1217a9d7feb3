//! Web layer for the departure planner.
//!
//! Provides a JSON endpoint for planning departures.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
