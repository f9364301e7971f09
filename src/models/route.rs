//! Route result model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo;
use crate::models::Coordinate;

/// How the endpoints of a route were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionQuality {
    /// Both endpoints matched the catalog or were given as coordinates
    Exact,
    /// At least one lookup missed and both endpoints were substituted
    Fallback,
}

/// Means of travel used for the time estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TravelMode {
    #[default]
    Car,
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelMode::Car => f.write_str("Car"),
        }
    }
}

/// A computed route between two points
///
/// Distance and travel time are derived together from the endpoint pair when
/// the route is built and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    start: Coordinate,
    end: Coordinate,
    start_label: String,
    end_label: String,
    distance_km: f64,
    eta: String,
    quality: ResolutionQuality,
    travel_mode: TravelMode,
    calculated_at: DateTime<Utc>,
}

impl RouteResult {
    /// Build a route, computing distance and travel time from the endpoints
    #[must_use]
    pub fn compute(
        start: Coordinate,
        end: Coordinate,
        start_label: impl Into<String>,
        end_label: impl Into<String>,
        quality: ResolutionQuality,
        average_speed_kmh: f64,
    ) -> Self {
        let distance_km = geo::distance_km(start, end);
        Self {
            start,
            end,
            start_label: start_label.into(),
            end_label: end_label.into(),
            distance_km,
            eta: geo::estimate_eta(distance_km, average_speed_kmh),
            quality,
            travel_mode: TravelMode::Car,
            calculated_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn start(&self) -> Coordinate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Coordinate {
        self.end
    }

    #[must_use]
    pub fn start_label(&self) -> &str {
        &self.start_label
    }

    #[must_use]
    pub fn end_label(&self) -> &str {
        &self.end_label
    }

    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Distance formatted for display, e.g. `"650 m"` or `"452.3 km"`
    #[must_use]
    pub fn distance_text(&self) -> String {
        geo::format_distance(self.distance_km)
    }

    #[must_use]
    pub fn eta(&self) -> &str {
        &self.eta
    }

    #[must_use]
    pub fn quality(&self) -> ResolutionQuality {
        self.quality
    }

    #[must_use]
    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    #[must_use]
    pub fn calculated_at(&self) -> DateTime<Utc> {
        self.calculated_at
    }
}
