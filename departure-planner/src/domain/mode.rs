//! Travel mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unrecognised travel mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode: {0:?} (expected car, bicycle, motorcycle or pedestrian)")]
pub struct UnknownTravelMode(pub String);

/// How the traveler gets from origin to destination.
///
/// The string forms match the routing provider's `travelMode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Car,
    Bicycle,
    Motorcycle,
    Pedestrian,
}

impl TravelMode {
    /// All modes, in a stable order.
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Car,
        TravelMode::Bicycle,
        TravelMode::Motorcycle,
        TravelMode::Pedestrian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Bicycle => "bicycle",
            TravelMode::Motorcycle => "motorcycle",
            TravelMode::Pedestrian => "pedestrian",
        }
    }

    /// Whether trips in this mode are subject to the maximum-distance check.
    pub fn is_distance_limited(&self) -> bool {
        matches!(self, TravelMode::Bicycle | TravelMode::Pedestrian)
    }
}

impl FromStr for TravelMode {
    type Err = UnknownTravelMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        TravelMode::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| UnknownTravelMode(s.to_string()))
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_modes() {
        assert_eq!("car".parse::<TravelMode>().unwrap(), TravelMode::Car);
        assert_eq!("bicycle".parse::<TravelMode>().unwrap(), TravelMode::Bicycle);
        assert_eq!(
            "motorcycle".parse::<TravelMode>().unwrap(),
            TravelMode::Motorcycle
        );
        assert_eq!(
            "pedestrian".parse::<TravelMode>().unwrap(),
            TravelMode::Pedestrian
        );
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" Car ".parse::<TravelMode>().unwrap(), TravelMode::Car);
        assert_eq!("BICYCLE".parse::<TravelMode>().unwrap(), TravelMode::Bicycle);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "truck".parse::<TravelMode>().unwrap_err();
        assert_eq!(err, UnknownTravelMode("truck".into()));
        assert!(err.to_string().contains("truck"));
    }

    #[test]
    fn display_matches_as_str() {
        for mode in TravelMode::ALL {
            assert_eq!(mode.to_string(), mode.as_str());
            assert_eq!(mode.as_str().parse::<TravelMode>().unwrap(), mode);
        }
    }

    #[test]
    fn distance_limited_modes() {
        assert!(TravelMode::Bicycle.is_distance_limited());
        assert!(TravelMode::Pedestrian.is_distance_limited());
        assert!(!TravelMode::Car.is_distance_limited());
        assert!(!TravelMode::Motorcycle.is_distance_limited());
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&TravelMode::Motorcycle).unwrap();
        assert_eq!(json, "\"motorcycle\"");
        let mode: TravelMode = serde_json::from_str("\"pedestrian\"").unwrap();
        assert_eq!(mode, TravelMode::Pedestrian);
    }
}
