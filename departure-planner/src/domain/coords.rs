//! Geographic coordinate types.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Error returned when constructing invalid coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinates: {reason}")]
pub struct InvalidCoordinates {
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair.
///
/// Both components are finite and within range by construction, which is
/// what allows `Coordinates` to implement `Eq` and `Hash` (compared by bit
/// pattern) and to serve as part of a cache key.
///
/// # Examples
///
/// ```
/// use departure_planner::domain::Coordinates;
///
/// let charminar = Coordinates::new(17.3616, 78.4747).unwrap();
/// assert_eq!(charminar.to_string(), "17.3616,78.4747");
///
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Create coordinates, validating ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinates {
                reason: "components must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates {
                reason: "latitude must be within -90..=90",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinates {
                reason: "longitude must be within -180..=180",
            });
        }

        // Normalise negative zero so equal values hash equally.
        Ok(Self {
            lat: lat + 0.0,
            lon: lon + 0.0,
        })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl PartialEq for Coordinates {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for Coordinates {}

impl Hash for Coordinates {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.lon.to_bits().hash(state);
    }
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinates({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Axis-aligned bounding box around two points, padded on every side.
///
/// Used for incident queries covering the area between origin and destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Bounding box of `a` and `b`, grown by `padding` degrees.
    pub fn around(a: Coordinates, b: Coordinates, padding: f64) -> Self {
        Self {
            min_lat: a.lat.min(b.lat) - padding,
            min_lon: a.lon.min(b.lon) - padding,
            max_lat: a.lat.max(b.lat) + padding,
            max_lon: a.lon.max(b.lon) + padding,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}
