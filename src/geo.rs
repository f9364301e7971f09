//! Great-circle distance and travel-time estimation
//!
//! Pure functions shared by the resolver, the session and the CLI. Distances
//! are straight lines over a spherical Earth; travel times assume a constant
//! average speed.

use haversine::Units;
use std::f64::consts::PI;

use crate::models::Coordinate;

/// Mean Earth radius in kilometers, as used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average car speed in km/h
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 80.0;

/// Great-circle distance between two coordinates in kilometers
#[must_use]
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let km = haversine::distance(from.into(), to.into(), Units::Kilometers);
    // Rounding near antipodes can push the haversine term past 1.
    if km.is_nan() && from.is_valid() && to.is_valid() {
        return EARTH_RADIUS_KM * PI;
    }
    km
}

/// Format the travel time for a distance at the given average speed
///
/// Under an hour renders as whole minutes (`"42 minutes"`), under a day as
/// hours and minutes (`"5h 39m"`), otherwise as days and hours (`"3d 1h"`).
/// Exactly one hour is `"1h 0m"` and exactly one day is `"1d 0h"`.
#[must_use]
pub fn estimate_eta(distance_km: f64, average_speed_kmh: f64) -> String {
    let hours = distance_km / average_speed_kmh;

    if hours < 1.0 {
        format!("{} minutes", (hours * 60.0).round())
    } else if hours < 24.0 {
        let whole = hours.floor();
        let minutes = ((hours - whole) * 60.0).round();
        format!("{whole}h {minutes}m")
    } else {
        let days = (hours / 24.0).floor();
        let rest = (hours % 24.0).floor();
        format!("{days}d {rest}h")
    }
}

/// Travel time at [`DEFAULT_AVERAGE_SPEED_KMH`]
#[must_use]
pub fn estimate_eta_default(distance_km: f64) -> String {
    estimate_eta(distance_km, DEFAULT_AVERAGE_SPEED_KMH)
}

/// Format a distance for display: meters below 1 km, otherwise km with one decimal
#[must_use]
pub fn format_distance(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!("{} m", (distance_km * 1000.0).round())
    } else {
        format!("{distance_km:.1} km")
    }
}
