//! Map display surface
//!
//! [`MapSurface`] is what the route session needs from a map: draw a route,
//! drop a marker, move the view. [`MapController`] is a headless
//! implementation that keeps the marker list, the current route overlay and
//! the viewport, and is what the CLI renders from.

use serde::Serialize;
use tracing::debug;

use crate::catalog::LocationCatalog;
use crate::config::MapConfig;
use crate::models::{Coordinate, RouteResult};

/// Display collaborator fed by the route session
pub trait MapSurface: Send {
    /// Draw start and end markers joined by a line and fit the view to them
    fn show_route(&mut self, route: &RouteResult);

    /// Place a labelled marker
    fn show_marker(&mut self, coordinate: Coordinate, label: &str);

    /// Center the view on a single point
    fn focus(&mut self, coordinate: Coordinate);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerKind {
    Destination,
    RouteStart,
    RouteEnd,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub label: String,
    pub kind: MarkerKind,
}

/// Axis-aligned box around a set of points
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    #[must_use]
    pub fn around(a: Coordinate, b: Coordinate) -> Self {
        Self {
            south_west: Coordinate::new(a.latitude.min(b.latitude), a.longitude.min(b.longitude)),
            north_east: Coordinate::new(a.latitude.max(b.latitude), a.longitude.max(b.longitude)),
        }
    }

    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }

    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Viewport {
    Centered { center: Coordinate, zoom: u8 },
    Fitted { bounds: Bounds, padding_px: u32 },
}

/// Markers and line of the route currently on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOverlay {
    pub start: Marker,
    pub end: Marker,
    pub line: [Coordinate; 2],
}

/// Headless map state
#[derive(Debug, Clone, Serialize)]
pub struct MapController {
    markers: Vec<Marker>,
    route: Option<RouteOverlay>,
    viewport: Viewport,
    focus_zoom: u8,
    fit_padding_px: u32,
}

impl MapController {
    #[must_use]
    pub fn new(config: &MapConfig) -> Self {
        Self {
            markers: Vec::new(),
            route: None,
            viewport: Viewport::Centered {
                center: config.center,
                zoom: config.zoom,
            },
            focus_zoom: config.focus_zoom,
            fit_padding_px: config.fit_padding_px,
        }
    }

    /// Add one marker per catalog destination
    pub fn populate(&mut self, catalog: &LocationCatalog) {
        self.markers.extend(catalog.destinations().iter().map(|d| Marker {
            coordinate: d.coordinate,
            label: d.name.to_string(),
            kind: MarkerKind::Destination,
        }));
        debug!("Map populated with {} destination markers", self.markers.len());
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The marker placed exactly at a coordinate, if any
    #[must_use]
    pub fn marker_at(&self, coordinate: Coordinate) -> Option<&Marker> {
        self.markers.iter().find(|m| m.coordinate == coordinate)
    }

    #[must_use]
    pub fn route(&self) -> Option<&RouteOverlay> {
        self.route.as_ref()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl MapSurface for MapController {
    fn show_route(&mut self, route: &RouteResult) {
        let start = Marker {
            coordinate: route.start(),
            label: format!("Start: {}", route.start_label()),
            kind: MarkerKind::RouteStart,
        };
        let end = Marker {
            coordinate: route.end(),
            label: format!("Destination: {}", route.end_label()),
            kind: MarkerKind::RouteEnd,
        };

        self.viewport = Viewport::Fitted {
            bounds: Bounds::around(route.start(), route.end()),
            padding_px: self.fit_padding_px,
        };
        // The previous overlay is dropped with the assignment.
        self.route = Some(RouteOverlay {
            start,
            end,
            line: [route.start(), route.end()],
        });
    }

    fn show_marker(&mut self, coordinate: Coordinate, label: &str) {
        self.markers.push(Marker {
            coordinate,
            label: label.to_string(),
            kind: MarkerKind::Destination,
        });
    }

    fn focus(&mut self, coordinate: Coordinate) {
        self.viewport = Viewport::Centered {
            center: coordinate,
            zoom: self.focus_zoom,
        };
    }
}
