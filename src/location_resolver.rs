//! Location Resolution Module
//!
//! Turns the two endpoints of a route request into coordinates. Names go
//! through the catalog; endpoints picked from the catalog arrive as known
//! coordinates and skip the lookup.
//!
//! When any lookup misses, both endpoints are replaced by demo points near two
//! reference coordinates so a route can still be drawn. The result carries a
//! [`ResolutionQuality`] flag so callers can tell the difference, and strict
//! mode reports the miss as an error instead.

use std::sync::Arc;

use rand::RngExt;
use tracing::{debug, warn};

use crate::TravelMapError;
use crate::catalog::LocationCatalog;
use crate::config::RoutingConfig;
use crate::models::{Coordinate, ResolutionQuality};

/// Source of the random offsets applied to substituted points
pub trait JitterSource: Send + Sync {
    /// An offset in degrees, uniformly drawn from `(-max_deg, max_deg)`
    fn offset(&self, max_deg: f64) -> f64;
}

/// Draws offsets from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn offset(&self, max_deg: f64) -> f64 {
        if max_deg <= 0.0 {
            return 0.0;
        }
        rand::rng().random_range(-max_deg..max_deg)
    }
}

/// One side of a route request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Endpoint<'a> {
    /// Free text typed by the user
    Name(&'a str),
    /// A coordinate that is already known, e.g. a catalog pick
    Known(Coordinate),
}

/// Coordinates for both endpoints of a route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRoute {
    pub start: Coordinate,
    pub end: Coordinate,
    pub quality: ResolutionQuality,
}

/// Where substituted points are placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackPolicy {
    pub start: Coordinate,
    pub end: Coordinate,
    pub jitter_deg: f64,
}

impl From<&RoutingConfig> for FallbackPolicy {
    fn from(config: &RoutingConfig) -> Self {
        Self {
            start: config.fallback_start,
            end: config.fallback_end,
            jitter_deg: config.fallback_jitter_deg,
        }
    }
}

/// Service for resolving route endpoints
#[derive(Clone)]
pub struct RouteResolver {
    catalog: LocationCatalog,
    fallback: FallbackPolicy,
    strict: bool,
    jitter: Arc<dyn JitterSource>,
}

impl RouteResolver {
    #[must_use]
    pub fn new(catalog: LocationCatalog, config: &RoutingConfig) -> Self {
        Self {
            catalog,
            fallback: FallbackPolicy::from(config),
            strict: config.strict_resolution,
            jitter: Arc::new(ThreadRngJitter),
        }
    }

    /// Replace the random source used for substituted points
    #[must_use]
    pub fn with_jitter(mut self, jitter: impl JitterSource + 'static) -> Self {
        self.jitter = Arc::new(jitter);
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    /// Resolve two place names
    pub fn resolve(&self, start_text: &str, end_text: &str) -> crate::Result<ResolvedRoute> {
        self.resolve_endpoints(Endpoint::Name(start_text), Endpoint::Name(end_text))
    }

    /// Resolve two endpoints, substituting demo points if any name is unknown
    pub fn resolve_endpoints<'a>(
        &self,
        start: Endpoint<'a>,
        end: Endpoint<'a>,
    ) -> crate::Result<ResolvedRoute> {
        debug!("Resolving route endpoints: {:?} -> {:?}", start, end);

        match (self.lookup(start), self.lookup(end)) {
            (Ok(start), Ok(end)) => Ok(ResolvedRoute {
                start,
                end,
                quality: ResolutionQuality::Exact,
            }),
            (Err(missing), _) | (_, Err(missing)) => {
                if self.strict {
                    return Err(TravelMapError::location_not_found(missing));
                }
                warn!(
                    "Location '{}' not in catalog, substituting demo route",
                    missing
                );
                Ok(self.synthetic_route())
            }
        }
    }

    fn lookup<'a>(&self, endpoint: Endpoint<'a>) -> std::result::Result<Coordinate, &'a str> {
        match endpoint {
            Endpoint::Known(coordinate) => Ok(coordinate),
            Endpoint::Name(name) => self.catalog.resolve(name).ok_or(name),
        }
    }

    fn synthetic_route(&self) -> ResolvedRoute {
        let start = self.jittered(self.fallback.start);
        let end = self.jittered(self.fallback.end);
        debug!(
            "Substituted points: {} -> {}",
            start.format_coordinates(),
            end.format_coordinates()
        );
        ResolvedRoute {
            start,
            end,
            quality: ResolutionQuality::Fallback,
        }
    }

    fn jittered(&self, reference: Coordinate) -> Coordinate {
        let max = self.fallback.jitter_deg;
        reference.offset(self.jitter.offset(max), self.jitter.offset(max))
    }
}
