//! TomTom geocoding, routing and traffic client.

mod client;
mod types;

pub use client::{TomTomClient, TomTomConfig};
pub use types::{GeocodeResponse, IncidentsResponse, RouteResponse, RouteSummary};
