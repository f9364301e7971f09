//! `TravelMap` - destination browsing and straight-line route estimates
//!
//! This library provides a static destination catalog, great-circle distance
//! and travel-time estimation, and a route session that resolves two place
//! names and keeps the most recent route for display on a map.

pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod location_resolver;
pub mod logging;
pub mod map;
pub mod models;
pub mod routing;

// Re-export core types for public API
pub use catalog::{Destination, LocationCatalog, Region};
pub use config::TravelMapConfig;
pub use error::TravelMapError;
pub use location_resolver::{Endpoint, JitterSource, ResolvedRoute, RouteResolver};
pub use map::{MapController, MapSurface};
pub use models::{Coordinate, ResolutionQuality, RouteResult, TravelMode};
pub use routing::{Delay, NoDelay, RouteSession, SessionState, TokioDelay};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
