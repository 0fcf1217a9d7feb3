//! TomTom API response types.
//!
//! Only the fields the planner reads are modelled; everything else in the
//! payloads is ignored.

use serde::Deserialize;

/// Response from the geocoding endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub position: Position,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// Response from the routing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub summary: RouteSummary,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub travel_time_in_seconds: f64,
    pub length_in_meters: f64,
}

/// Response from the traffic incident details endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentsResponse {
    #[serde(default)]
    pub incidents: Vec<Incident>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Incident {
    #[serde(default)]
    pub description: String,
}

impl IncidentsResponse {
    /// Descriptions that mention traffic, case-insensitively.
    pub fn traffic_descriptions(self) -> Vec<String> {
        self.incidents
            .into_iter()
            .map(|i| i.description)
            .filter(|d| d.to_lowercase().contains("traffic"))
            .collect()
    }
}
