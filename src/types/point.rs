use geo::HaversineDistance;
use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// A position on the globe in decimal degrees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a point from untrusted input, rejecting anything off the globe.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::Longitude(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Great circle distance in metres.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        Point::from(*self).haversine_distance(&Point::from(*other))
    }
}

// geo_types points are x = longitude, y = latitude
impl From<GeoPoint> for Point<f64> {
    fn from(value: GeoPoint) -> Self {
        Point::new(value.longitude, value.latitude)
    }
}
