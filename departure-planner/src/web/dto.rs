//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinates, Deadline, DomainError, TravelMode, WeatherSignal};
use crate::planner::{DepartureOption, Recommendation};

/// Advice shown when traffic incidents are reported along the trip.
pub const TRAFFIC_ALERT: &str = "Traffic is spiking, leave 5 min earlier!";

/// Request to plan a departure.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanDepartureRequest {
    /// Origin address, resolved within the configured region
    pub source: String,

    /// Destination address, resolved within the configured region
    pub destination: String,

    /// Arrival date in YYYY-MM-DD format
    pub arrival_date: String,

    /// Arrival time in HH:MM format
    pub arrival_time: String,

    /// One of car, bicycle, motorcycle, pedestrian
    pub travel_mode: String,
}

impl PlanDepartureRequest {
    /// Parse the deadline and travel mode.
    pub fn parse(&self) -> Result<(Deadline, TravelMode), DomainError> {
        let deadline = Deadline::parse(&self.arrival_date, &self.arrival_time)?;
        let mode = self.travel_mode.parse()?;
        Ok((deadline, mode))
    }
}

/// A recommended departure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartureView {
    /// Departure time (HH:MM)
    pub start_time: String,

    /// Departure as fractional hours since midnight
    pub start_hour: f64,

    /// Weather-adjusted travel time in minutes
    pub duration_minutes: f64,

    pub distance_km: f64,
}

impl From<&DepartureOption> for DepartureView {
    fn from(option: &DepartureOption) -> Self {
        Self {
            start_time: option.start_time(),
            start_hour: option.start_hour,
            duration_minutes: option.duration_minutes,
            distance_km: option.distance_km,
        }
    }
}

/// Response for departure planning.
#[derive(Debug, Clone, Serialize)]
pub struct PlanDepartureResponse {
    pub source: String,
    pub destination: String,
    pub travel_mode: TravelMode,

    /// Arrival deadline time (HH:MM)
    pub arrival_time: String,

    /// Deadline date, e.g. "Saturday, 2024-03-16"
    pub display_date: String,

    /// Latest departure that arrives on time
    pub preferred: DepartureView,

    /// Faster departure, when it saves enough time to be worth mentioning
    pub optimal: Option<DepartureView>,

    pub time_saving_minutes: f64,

    /// Weather the durations were adjusted for
    pub weather: WeatherSignal,

    pub traffic_alert: Option<String>,

    /// Traffic incident descriptions near the trip
    pub incidents: Vec<String>,

    /// Directions link for the chosen mode
    pub google_maps_url: String,
}

/// Everything resolved for one planning request, ready for the response.
#[derive(Debug, Clone)]
pub struct PlannedTrip<'a> {
    pub request: &'a PlanDepartureRequest,
    pub deadline: Deadline,
    pub mode: TravelMode,
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub recommendation: Recommendation,
    pub incidents: Vec<String>,
}

impl From<PlannedTrip<'_>> for PlanDepartureResponse {
    fn from(trip: PlannedTrip<'_>) -> Self {
        let result = &trip.recommendation.result;
        Self {
            source: trip.request.source.clone(),
            destination: trip.request.destination.clone(),
            travel_mode: trip.mode,
            arrival_time: trip.deadline.time_hhmm(),
            display_date: trip.deadline.display_date(),
            preferred: DepartureView::from(&result.preferred),
            optimal: result.optimal.as_ref().map(DepartureView::from),
            time_saving_minutes: result.time_saving_minutes,
            weather: trip.recommendation.weather,
            traffic_alert: traffic_alert(&trip.incidents),
            incidents: trip.incidents,
            google_maps_url: google_maps_url(trip.origin, trip.destination, trip.mode),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: &'static str,

    /// Human-readable message
    pub message: String,

    /// Shortest travel time seen, when no departure was feasible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration_minutes: Option<f64>,
}

/// The traffic alert to show, if any incidents were reported.
pub fn traffic_alert(incidents: &[String]) -> Option<String> {
    (!incidents.is_empty()).then(|| TRAFFIC_ALERT.to_string())
}

/// Google Maps directions link between two points.
pub fn google_maps_url(origin: Coordinates, destination: Coordinates, mode: TravelMode) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={origin}&destination={destination}&travelmode={mode}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::OptimizationResult;

    fn request() -> PlanDepartureRequest {
        PlanDepartureRequest {
            source: "Secunderabad".into(),
            destination: "Charminar".into(),
            arrival_date: "2024-03-16".into(),
            arrival_time: "09:00".into(),
            travel_mode: "Car".into(),
        }
    }

    fn coords(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    fn option(start_hour: f64, duration_minutes: f64) -> DepartureOption {
        DepartureOption {
            start_hour,
            duration_minutes,
            distance_km: 9.4,
        }
    }

    #[test]
    fn parse_request() {
        let (deadline, mode) = request().parse().unwrap();
        assert_eq!(deadline.to_string(), "2024-03-16 09:00");
        assert_eq!(mode, TravelMode::Car);
    }

    #[test]
    fn parse_request_rejects_bad_fields() {
        let mut req = request();
        req.travel_mode = "teleport".into();
        assert!(matches!(req.parse(), Err(DomainError::TravelMode(_))));

        let mut req = request();
        req.arrival_time = "9am".into();
        assert!(matches!(req.parse(), Err(DomainError::Time(_))));

        let mut req = request();
        req.arrival_date = "16/03/2024".into();
        assert!(matches!(req.parse(), Err(DomainError::Time(_))));
    }

    #[test]
    fn request_from_json() {
        let json = r#"{
            "source": "Secunderabad",
            "destination": "Charminar",
            "arrival_date": "2024-03-16",
            "arrival_time": "09:00",
            "travel_mode": "bicycle"
        }"#;
        let req: PlanDepartureRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.travel_mode, "bicycle");
    }

    #[test]
    fn maps_url() {
        let url = google_maps_url(
            coords(17.44, 78.5),
            coords(17.3616, 78.4747),
            TravelMode::Pedestrian,
        );
        assert_eq!(
            url,
            "https://www.google.com/maps/dir/?api=1&origin=17.44,78.5&destination=17.3616,78.4747&travelmode=pedestrian"
        );
    }

    #[test]
    fn alert_only_with_incidents() {
        assert_eq!(traffic_alert(&[]), None);
        assert_eq!(
            traffic_alert(&["Stationary traffic".to_string()]).as_deref(),
            Some(TRAFFIC_ALERT)
        );
    }

    #[test]
    fn response_from_trip() {
        let req = request();
        let (deadline, mode) = req.parse().unwrap();
        let trip = PlannedTrip {
            request: &req,
            deadline,
            mode,
            origin: coords(17.44, 78.5),
            destination: coords(17.3616, 78.4747),
            recommendation: Recommendation {
                result: OptimizationResult {
                    preferred: option(8.5, 25.0),
                    optimal: Some(option(8.25, 19.0)),
                    time_saving_minutes: 6.0,
                },
                weather: WeatherSignal::CLEAR,
            },
            incidents: vec!["Queuing traffic".into()],
        };

        let resp = PlanDepartureResponse::from(trip);

        assert_eq!(resp.arrival_time, "09:00");
        assert_eq!(resp.display_date, "Saturday, 2024-03-16");
        assert_eq!(resp.preferred.start_time, "08:30");
        assert_eq!(resp.optimal.as_ref().unwrap().start_time, "08:15");
        assert_eq!(resp.time_saving_minutes, 6.0);
        assert_eq!(resp.traffic_alert.as_deref(), Some(TRAFFIC_ALERT));
        assert!(resp.google_maps_url.ends_with("travelmode=car"));

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["travel_mode"], "car");
        assert_eq!(json["preferred"]["duration_minutes"], 25.0);
    }

    #[test]
    fn error_body_omits_missing_duration() {
        let body = ErrorResponse {
            error: "invalid_input",
            message: "bad".into(),
            min_duration_minutes: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("min_duration_minutes").is_none());
        assert_eq!(json["error"], "invalid_input");
    }
}
