//! Domain types for the departure planner.
//!
//! Value types shared by the optimizer, the provider clients and the web
//! layer. Types with invariants enforce them at construction time.

mod coords;
mod error;
mod estimate;
mod mode;
mod time;
mod weather;

pub use coords::{BoundingBox, Coordinates, InvalidCoordinates};
pub use error::DomainError;
pub use estimate::TravelEstimate;
pub use mode::{TravelMode, UnknownTravelMode};
pub use time::{
    Deadline, SECS_PER_HOUR, TimeError, format_hour, fractional_hour, parse_date, parse_hhmm,
};
pub use weather::{WeatherReading, WeatherSignal};
