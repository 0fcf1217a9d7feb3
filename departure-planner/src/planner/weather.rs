//! Weather adjustment of travel durations.
//!
//! Rain slows every mode down, but by different amounts: a mode-specific
//! factor grows linearly with the precipitation level and is clamped to a
//! per-mode range.

use crate::domain::TravelMode;

/// Precipitation at or below this level leaves durations unchanged.
pub const PRECIPITATION_THRESHOLD: f64 = 0.5;

/// Linear growth and clamp range of one mode's slowdown factor.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FactorCurve {
    /// Factor is `1 + precipitation / divisor` before clamping.
    divisor: f64,
    min: f64,
    max: f64,
}

fn curve_for(mode: TravelMode) -> FactorCurve {
    match mode {
        TravelMode::Bicycle => FactorCurve {
            divisor: 10.0,
            min: 1.10,
            max: 1.50,
        },
        TravelMode::Motorcycle => FactorCurve {
            divisor: 20.0,
            min: 1.05,
            max: 1.20,
        },
        TravelMode::Car => FactorCurve {
            divisor: 15.0,
            min: 1.05,
            max: 1.30,
        },
        TravelMode::Pedestrian => FactorCurve {
            divisor: 10.0,
            min: 1.10,
            max: 1.40,
        },
    }
}

/// The multiplier applied to a travel duration in the given conditions.
///
/// Returns exactly `1.0` when precipitation is at or below
/// [`PRECIPITATION_THRESHOLD`].
pub fn weather_factor(precipitation: f64, mode: TravelMode) -> f64 {
    if precipitation <= PRECIPITATION_THRESHOLD {
        return 1.0;
    }

    let curve = curve_for(mode);
    (1.0 + precipitation / curve.divisor).clamp(curve.min, curve.max)
}

/// Scale a raw travel duration for the weather.
///
/// # Examples
///
/// ```
/// use departure_planner::domain::TravelMode;
/// use departure_planner::planner::adjust_duration;
///
/// // Light drizzle: no change.
/// assert_eq!(adjust_duration(20.0, 0.5, TravelMode::Car), 20.0);
///
/// // Heavy rain: cars are capped at +30%.
/// assert_eq!(adjust_duration(20.0, 50.0, TravelMode::Car), 26.0);
/// ```
pub fn adjust_duration(duration_minutes: f64, precipitation: f64, mode: TravelMode) -> f64 {
    if precipitation <= PRECIPITATION_THRESHOLD {
        return duration_minutes;
    }
    duration_minutes * weather_factor(precipitation, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn dry_weather_is_identity() {
        for mode in TravelMode::ALL {
            assert_eq!(adjust_duration(17.3, 0.0, mode), 17.3);
            assert_eq!(adjust_duration(17.3, 0.5, mode), 17.3);
        }
    }

    #[test]
    fn light_rain_uses_lower_clamp() {
        // 0.6 / 10 = 0.06 -> clamped up to the minimum factor
        assert!(approx(weather_factor(0.6, TravelMode::Bicycle), 1.10));
        assert!(approx(weather_factor(0.6, TravelMode::Motorcycle), 1.05));
        assert!(approx(weather_factor(0.6, TravelMode::Car), 1.05));
        assert!(approx(weather_factor(0.6, TravelMode::Pedestrian), 1.10));
    }

    #[test]
    fn moderate_rain_is_linear() {
        assert!(approx(weather_factor(3.0, TravelMode::Bicycle), 1.30));
        assert!(approx(weather_factor(3.0, TravelMode::Motorcycle), 1.15));
        assert!(approx(weather_factor(3.0, TravelMode::Car), 1.20));
        assert!(approx(weather_factor(3.0, TravelMode::Pedestrian), 1.30));
    }

    #[test]
    fn heavy_rain_uses_upper_clamp() {
        assert!(approx(weather_factor(100.0, TravelMode::Bicycle), 1.50));
        assert!(approx(weather_factor(100.0, TravelMode::Motorcycle), 1.20));
        assert!(approx(weather_factor(100.0, TravelMode::Car), 1.30));
        assert!(approx(weather_factor(100.0, TravelMode::Pedestrian), 1.40));
    }

    #[test]
    fn adjust_scales_duration() {
        assert!(approx(adjust_duration(30.0, 3.0, TravelMode::Car), 36.0));
        assert!(approx(adjust_duration(30.0, 3.0, TravelMode::Bicycle), 39.0));
    }
}
