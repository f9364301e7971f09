//! Configuration management for `TravelMap`
//!
//! Handles loading configuration from files and environment variables
//! and validates every setting before use.

use crate::TravelMapError;
use crate::models::Coordinate;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelMapConfig {
    /// Route calculation settings
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Initial map view settings
    #[serde(default)]
    pub map: MapConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Route calculation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Assumed average speed for travel time estimates
    #[serde(default = "default_average_speed")]
    pub average_speed_kmh: f64,
    /// Artificial delay before a route is produced
    #[serde(default = "default_simulated_delay")]
    pub simulated_delay_ms: u64,
    /// Report unknown places as errors instead of substituting demo points
    #[serde(default)]
    pub strict_resolution: bool,
    /// Maximum random offset applied to substituted points, per axis
    #[serde(default = "default_fallback_jitter")]
    pub fallback_jitter_deg: f64,
    /// Reference point for a substituted start
    #[serde(default = "default_fallback_start")]
    pub fallback_start: Coordinate,
    /// Reference point for a substituted end
    #[serde(default = "default_fallback_end")]
    pub fallback_end: Coordinate,
}

/// Initial map view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Center of the initial view
    #[serde(default = "default_map_center")]
    pub center: Coordinate,
    /// Zoom level of the initial view
    #[serde(default = "default_map_zoom")]
    pub zoom: u8,
    /// Zoom level used when focusing a single destination
    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: u8,
    /// Padding around a fitted route in pixels
    #[serde(default = "default_fit_padding")]
    pub fit_padding_px: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_average_speed() -> f64 {
    crate::geo::DEFAULT_AVERAGE_SPEED_KMH
}

fn default_simulated_delay() -> u64 {
    2000
}

fn default_fallback_jitter() -> f64 {
    0.05
}

fn default_fallback_start() -> Coordinate {
    Coordinate::new(40.7128, -74.0060)
}

fn default_fallback_end() -> Coordinate {
    Coordinate::new(48.8566, 2.3522)
}

fn default_map_center() -> Coordinate {
    Coordinate::new(40.7128, -74.0060)
}

fn default_map_zoom() -> u8 {
    10
}

fn default_focus_zoom() -> u8 {
    12
}

fn default_fit_padding() -> u32 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

const MAX_ZOOM: u8 = 19;

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: default_average_speed(),
            simulated_delay_ms: default_simulated_delay(),
            strict_resolution: false,
            fallback_jitter_deg: default_fallback_jitter(),
            fallback_start: default_fallback_start(),
            fallback_end: default_fallback_end(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_map_center(),
            zoom: default_map_zoom(),
            focus_zoom: default_focus_zoom(),
            fit_padding_px: default_fit_padding(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl TravelMapConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TRAVELMAP_ROUTING__AVERAGE_SPEED_KMH=100
        builder = builder.add_source(
            Environment::with_prefix("TRAVELMAP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelMapConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to deserialize configuration from {}", config_file.display()))?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travelmap").join("config.toml"))
    }

    /// Apply default values to zeroed or empty fields
    pub fn apply_defaults(&mut self) {
        if self.routing.average_speed_kmh == 0.0 {
            self.routing.average_speed_kmh = default_average_speed();
        }
        if self.map.zoom == 0 {
            self.map.zoom = default_map_zoom();
        }
        if self.map.focus_zoom == 0 {
            self.map.focus_zoom = default_focus_zoom();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_routing()?;
        self.validate_map()?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_routing(&self) -> Result<()> {
        let routing = &self.routing;

        if !(routing.average_speed_kmh > 0.0 && routing.average_speed_kmh <= 300.0) {
            return Err(TravelMapError::config(
                "Average speed must be greater than 0 and at most 300 km/h",
            )
            .into());
        }

        if routing.simulated_delay_ms > 10_000 {
            return Err(
                TravelMapError::config("Simulated delay cannot exceed 10000 ms").into(),
            );
        }

        if !(0.0..=1.0).contains(&routing.fallback_jitter_deg) {
            return Err(TravelMapError::config(
                "Fallback jitter must be between 0 and 1 degree",
            )
            .into());
        }

        for (name, point) in [
            ("fallback_start", routing.fallback_start),
            ("fallback_end", routing.fallback_end),
        ] {
            if !point.is_valid() {
                return Err(TravelMapError::config(format!(
                    "Routing {name} is not a valid coordinate: {}",
                    point.format_coordinates()
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_map(&self) -> Result<()> {
        if !self.map.center.is_valid() {
            return Err(TravelMapError::config("Map center is not a valid coordinate").into());
        }

        if self.map.zoom > MAX_ZOOM || self.map.focus_zoom > MAX_ZOOM {
            return Err(
                TravelMapError::config(format!("Map zoom cannot exceed {MAX_ZOOM}")).into(),
            );
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelMapError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "compact"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelMapError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
