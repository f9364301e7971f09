//! Data models for the `TravelMap` library
//!
//! - Location: geographic coordinates
//! - Route: computed routes and how their endpoints were resolved

pub mod location;
pub mod route;

pub use location::Coordinate;
pub use route::{ResolutionQuality, RouteResult, TravelMode};
