//! Weatherstack forecast response types.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::WeatherReading;

/// Response from the forecast endpoint.
///
/// Error payloads (`{"success": false, "error": {...}}`) parse to an empty
/// forecast.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    /// Daily forecasts keyed by "YYYY-MM-DD".
    #[serde(default)]
    pub forecast: HashMap<String, ForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    #[serde(default)]
    pub hourly: Vec<HourlyForecast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyForecast {
    /// Time of day as HHMM without padding ("0", "300", "1200").
    pub time: HourField,
    pub temperature: f64,
    pub precip: f64,
}

/// The `time` field is documented as a string but some plans return a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HourField {
    Text(String),
    Number(u32),
}

impl HourlyForecast {
    /// The hour of day this entry describes.
    pub fn hour(&self) -> Option<u32> {
        let hhmm = match &self.time {
            HourField::Text(s) => s.trim().parse::<u32>().ok()?,
            HourField::Number(n) => *n,
        };
        Some(hhmm / 100)
    }
}

impl ForecastResponse {
    /// The reading for `date` whose hour is closest to `hour`.
    ///
    /// Ties go to the entry listed first. Returns `None` when the response has
    /// no usable entry for `date`.
    pub fn reading_at(&self, date: NaiveDate, hour: u32) -> Option<WeatherReading> {
        let day = self.forecast.get(&date.format("%Y-%m-%d").to_string())?;

        let mut closest: Option<(u32, &HourlyForecast)> = None;
        for entry in &day.hourly {
            let Some(h) = entry.hour() else { continue };
            let gap = h.abs_diff(hour);
            if closest.is_none_or(|(best, _)| gap < best) {
                closest = Some((gap, entry));
            }
        }

        closest.map(|(_, e)| WeatherReading::new(e.precip, e.temperature))
    }
}
