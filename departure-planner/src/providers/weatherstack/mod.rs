//! Weatherstack forecast client.

mod client;
mod types;

pub use client::{WeatherstackClient, WeatherstackConfig};
pub use types::{ForecastDay, ForecastResponse, HourField, HourlyForecast};
