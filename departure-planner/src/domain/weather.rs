//! Weather readings and the per-run weather signal.

use serde::Serialize;

/// A single forecast reading at one location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherReading {
    /// Precipitation level as reported by the provider (0 = none).
    pub precipitation: f64,

    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

impl WeatherReading {
    /// Reading used when the provider has no data for the day or location.
    pub const FALLBACK: WeatherReading = WeatherReading {
        precipitation: 0.0,
        temperature: 32.0,
    };

    pub fn new(precipitation: f64, temperature: f64) -> Self {
        Self {
            precipitation,
            temperature,
        }
    }
}

/// Weather conditions for a whole optimization run.
///
/// Computed once per run from the origin and destination readings and shared
/// read-only by every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherSignal {
    pub precipitation: f64,
    pub temperature: f64,
}

impl WeatherSignal {
    /// A dry signal, for callers that have no weather information.
    pub const CLEAR: WeatherSignal = WeatherSignal {
        precipitation: 0.0,
        temperature: WeatherReading::FALLBACK.temperature,
    };

    /// Arithmetic mean of the given readings.
    ///
    /// An empty slice yields the fallback reading.
    pub fn aggregate(readings: &[WeatherReading]) -> Self {
        if readings.is_empty() {
            return Self::from(WeatherReading::FALLBACK);
        }

        let n = readings.len() as f64;
        let precipitation = readings.iter().map(|r| r.precipitation).sum::<f64>() / n;
        let temperature = readings.iter().map(|r| r.temperature).sum::<f64>() / n;

        Self {
            precipitation,
            temperature,
        }
    }
}

impl From<WeatherReading> for WeatherSignal {
    fn from(r: WeatherReading) -> Self {
        Self {
            precipitation: r.precipitation,
            temperature: r.temperature,
        }
    }
}
