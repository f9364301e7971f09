//! Route calculation session
//!
//! A [`RouteSession`] owns the current route. Each request is validated,
//! waits at the [`Delay`] seam, is resolved and measured, handed to the map
//! and then replaces the current route wholesale. Concurrent requests are
//! allowed; whichever finishes last is the current route.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};
use tracing::{info, instrument};

use crate::TravelMapError;
use crate::catalog::Destination;
use crate::config::RoutingConfig;
use crate::location_resolver::{Endpoint, RouteResolver};
use crate::map::MapSurface;
use crate::models::RouteResult;

/// Suspension point between a route request and its result
#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy)]
pub struct TokioDelay(pub Duration);

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No route calculated yet
    Idle,
    /// A current route is set
    HasRoute,
}

pub struct RouteSession<M, D = TokioDelay> {
    resolver: RouteResolver,
    average_speed_kmh: f64,
    delay: D,
    map: Mutex<M>,
    current: watch::Sender<Option<RouteResult>>,
}

impl<M: MapSurface> RouteSession<M, TokioDelay> {
    /// Create an idle session using the configured speed and delay
    #[must_use]
    pub fn new(resolver: RouteResolver, config: &RoutingConfig, map: M) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            resolver,
            average_speed_kmh: config.average_speed_kmh,
            delay: TokioDelay(Duration::from_millis(config.simulated_delay_ms)),
            map: Mutex::new(map),
            current,
        }
    }
}

impl<M: MapSurface, D: Delay> RouteSession<M, D> {
    /// Swap the suspension point, e.g. for [`NoDelay`] in tests
    #[must_use]
    pub fn with_delay<E: Delay>(self, delay: E) -> RouteSession<M, E> {
        RouteSession {
            resolver: self.resolver,
            average_speed_kmh: self.average_speed_kmh,
            delay,
            map: self.map,
            current: self.current,
        }
    }

    /// Calculate a route between two typed place names
    ///
    /// Fails with [`TravelMapError::EmptyInput`] when either name is blank, in
    /// which case the current route is left as it was. Unknown names fall back
    /// to a flagged demo route unless strict resolution is configured.
    #[instrument(skip(self))]
    pub async fn calculate(&self, start_text: &str, end_text: &str) -> crate::Result<RouteResult> {
        require_text("start", start_text)?;
        require_text("end", end_text)?;

        self.delay.wait().await;
        self.finish(
            Endpoint::Name(start_text),
            Endpoint::Name(end_text),
            start_text,
            end_text,
        )
        .await
    }

    /// Route between two catalog picks, skipping name resolution
    #[instrument(skip_all, fields(start = start.name, end = end.name))]
    pub async fn calculate_between(
        &self,
        start: &Destination,
        end: &Destination,
    ) -> crate::Result<RouteResult> {
        self.delay.wait().await;
        self.finish(
            Endpoint::Known(start.coordinate),
            Endpoint::Known(end.coordinate),
            start.name,
            end.name,
        )
        .await
    }

    /// Pick a destination from the map
    ///
    /// The map is centered on the destination. If a start has been typed, a
    /// route to the destination's coordinate is calculated; otherwise nothing
    /// else happens and `None` is returned.
    #[instrument(skip_all, fields(destination = destination.name))]
    pub async fn route_to_destination(
        &self,
        start_text: &str,
        destination: &Destination,
    ) -> crate::Result<Option<RouteResult>> {
        self.map.lock().await.focus(destination.coordinate);

        if start_text.trim().is_empty() {
            return Ok(None);
        }

        self.delay.wait().await;
        self.finish(
            Endpoint::Name(start_text),
            Endpoint::Known(destination.coordinate),
            start_text,
            destination.name,
        )
        .await
        .map(Some)
    }

    async fn finish(
        &self,
        start: Endpoint<'_>,
        end: Endpoint<'_>,
        start_label: &str,
        end_label: &str,
    ) -> crate::Result<RouteResult> {
        let resolved = self.resolver.resolve_endpoints(start, end)?;
        let route = RouteResult::compute(
            resolved.start,
            resolved.end,
            start_label,
            end_label,
            resolved.quality,
            self.average_speed_kmh,
        );

        self.map.lock().await.show_route(&route);
        self.current.send_replace(Some(route.clone()));

        info!(
            "Route {} -> {}: {} ({}, {:?})",
            start_label,
            end_label,
            route.distance_text(),
            route.eta(),
            route.quality()
        );
        Ok(route)
    }

    /// Snapshot of the current route
    #[must_use]
    pub fn current_route(&self) -> Option<RouteResult> {
        self.current.borrow().clone()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.current.borrow().is_some() {
            SessionState::HasRoute
        } else {
            SessionState::Idle
        }
    }

    /// Observe every replacement of the current route
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<RouteResult>> {
        self.current.subscribe()
    }

    /// Read the map surface
    pub async fn with_map<R>(&self, f: impl FnOnce(&M) -> R) -> R {
        f(&*self.map.lock().await)
    }

    #[must_use]
    pub fn resolver(&self) -> &RouteResolver {
        &self.resolver
    }
}

fn require_text(field: &str, text: &str) -> crate::Result<()> {
    if text.trim().is_empty() {
        return Err(TravelMapError::empty_input(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LocationCatalog;
    use crate::config::MapConfig;
    use crate::map::MapController;
    use crate::models::{Coordinate, ResolutionQuality};

    fn session() -> RouteSession<MapController, NoDelay> {
        let config = RoutingConfig::default();
        let resolver = RouteResolver::new(LocationCatalog::new(), &config);
        RouteSession::new(resolver, &config, MapController::new(&MapConfig::default()))
            .with_delay(NoDelay)
    }

    #[tokio::test]
    async fn test_starts_idle() {
        let session = session();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.current_route().is_none());
    }

    #[tokio::test]
    async fn test_calculate_sets_current_route() {
        let session = session();
        let route = session.calculate("New York", "Paris").await.unwrap();

        assert_eq!(session.state(), SessionState::HasRoute);
        assert_eq!(session.current_route(), Some(route.clone()));
        assert_eq!(route.quality(), ResolutionQuality::Exact);
        assert!((route.distance_km() - 5837.0).abs() < 5.0);
        assert_eq!(route.start_label(), "New York");
    }

    #[tokio::test]
    async fn test_labels_keep_original_text() {
        let session = session();
        let route = session.calculate("  TOKYO", "london ").await.unwrap();
        assert_eq!(route.start_label(), "  TOKYO");
        assert_eq!(route.end_label(), "london ");
        assert_eq!(route.quality(), ResolutionQuality::Exact);
    }

    #[tokio::test]
    async fn test_empty_input_leaves_route_unchanged() {
        let session = session();
        let err = session.calculate("", "Paris").await.unwrap_err();
        assert!(matches!(err, TravelMapError::EmptyInput { ref field } if field == "start"));
        assert_eq!(session.state(), SessionState::Idle);

        let first = session.calculate("Rome", "Madrid").await.unwrap();
        let err = session.calculate("Rome", "   ").await.unwrap_err();
        assert!(matches!(err, TravelMapError::EmptyInput { ref field } if field == "end"));
        assert_eq!(session.current_route(), Some(first));
    }

    #[tokio::test]
    async fn test_second_calculation_replaces_first() {
        let session = session();
        session.calculate("New York", "Paris").await.unwrap();
        session.calculate("Tokyo", "London").await.unwrap();

        let current = session.current_route().unwrap();
        assert_eq!(current.start_label(), "Tokyo");
        assert_eq!(current.end_label(), "London");
        assert_eq!(current.start(), Coordinate::new(35.6762, 139.6503));
        assert_eq!(current.end(), Coordinate::new(51.5074, -0.1278));

        let overlay_start = session
            .with_map(|map| map.route().map(|r| r.start.label.clone()))
            .await;
        assert_eq!(overlay_start.as_deref(), Some("Start: Tokyo"));
    }

    #[tokio::test]
    async fn test_unknown_place_yields_fallback_route() {
        let session = session();
        let route = session.calculate("Atlantis", "Paris").await.unwrap();
        assert_eq!(route.quality(), ResolutionQuality::Fallback);
        assert!((route.start().latitude - 40.7128).abs() < 0.05);
        assert!((route.end().longitude - 2.3522).abs() < 0.05);
        assert_eq!(route.start_label(), "Atlantis");
    }

    #[tokio::test]
    async fn test_calculate_between_catalog_picks() {
        let session = session();
        let catalog = LocationCatalog::new();
        let sydney = catalog.get("Sydney").unwrap();
        let auckland = catalog.get("Auckland").unwrap();

        let route = session.calculate_between(sydney, auckland).await.unwrap();
        assert_eq!(route.quality(), ResolutionQuality::Exact);
        assert_eq!(route.end_label(), "Auckland");
        assert!(route.distance_km() > 2000.0 && route.distance_km() < 2300.0);
    }

    #[tokio::test]
    async fn test_route_to_destination_without_start_only_focuses() {
        let session = session();
        let vienna = LocationCatalog::new().get("vienna").unwrap();

        let route = session.route_to_destination("  ", vienna).await.unwrap();
        assert!(route.is_none());
        assert_eq!(session.state(), SessionState::Idle);

        let viewport = session.with_map(|map| map.viewport()).await;
        assert_eq!(
            viewport,
            crate::map::Viewport::Centered {
                center: vienna.coordinate,
                zoom: 12
            }
        );
    }

    #[tokio::test]
    async fn test_route_to_destination_with_start() {
        let session = session();
        let vienna = LocationCatalog::new().get("Vienna").unwrap();

        let route = session
            .route_to_destination("Berlin", vienna)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(route.end(), vienna.coordinate);
        assert_eq!(route.end_label(), "Vienna");
        assert_eq!(route.quality(), ResolutionQuality::Exact);
    }

    #[tokio::test]
    async fn test_subscribers_see_replacements() {
        let session = session();
        let mut updates = session.subscribe();

        session.calculate("Dubai", "Mecca").await.unwrap();
        assert!(updates.has_changed().unwrap());
        let seen = updates.borrow_and_update().clone().unwrap();
        assert_eq!(seen.start_label(), "Dubai");
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_delay_suspends_before_result() {
        let config = RoutingConfig::default();
        let resolver = RouteResolver::new(LocationCatalog::new(), &config);
        let session = RouteSession::new(resolver, &config, MapController::new(&MapConfig::default()));

        let started = tokio::time::Instant::now();
        session.calculate("Madrid", "Rome").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }
}
