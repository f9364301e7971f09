//! Coordinate model for geographic positions

use serde::{Deserialize, Serialize};

use crate::TravelMapError;

/// A point on the globe in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees, -90 to 90
    pub latitude: f64,
    /// Longitude in decimal degrees, -180 to 180
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without range checks, for static data
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a coordinate, rejecting values outside the valid ranges
    pub fn try_new(latitude: f64, longitude: f64) -> crate::Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(TravelMapError::validation(format!(
                "latitude {latitude} must be between -90 and 90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(TravelMapError::validation(format!(
                "longitude {longitude} must be between -180 and 180"
            )));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Whether both axes are inside their valid ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        Self::try_new(self.latitude, self.longitude).is_ok()
    }

    /// Shift by the given offsets in degrees, clamped to the valid ranges
    #[must_use]
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> Self {
        Self {
            latitude: (self.latitude + d_lat).clamp(-90.0, 90.0),
            longitude: (self.longitude + d_lon).clamp(-180.0, 180.0),
        }
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl From<Coordinate> for haversine::Location {
    fn from(coordinate: Coordinate) -> Self {
        haversine::Location {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_format_coordinates() {
        let paris = Coordinate::new(48.8566, 2.3522);
        assert_eq!(paris.format_coordinates(), "48.8566, 2.3522");
    }

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(-91.0, 0.0)]
    #[case(0.0, 180.1)]
    #[case(0.0, -200.0)]
    #[case(f64::NAN, 0.0)]
    fn test_try_new_rejects_out_of_range(#[case] lat: f64, #[case] lon: f64) {
        assert!(Coordinate::try_new(lat, lon).is_err());
    }

    #[test]
    fn test_try_new_accepts_bounds() {
        assert!(Coordinate::try_new(90.0, -180.0).is_ok());
        assert!(Coordinate::try_new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_offset_clamps() {
        let near_pole = Coordinate::new(89.99, 179.99);
        let shifted = near_pole.offset(0.05, 0.05);
        assert_eq!(shifted.latitude, 90.0);
        assert_eq!(shifted.longitude, 180.0);
        assert!(shifted.is_valid());
    }
}
