//! Error types and handling for `TravelMap`

use thiserror::Error;

/// Main error type for the `TravelMap` library
#[derive(Error, Debug)]
pub enum TravelMapError {
    /// A required text input was empty after trimming
    #[error("Empty input: {field} must not be empty")]
    EmptyInput { field: String },

    /// A place name did not match the catalog (strict resolution only)
    #[error("Location not found: {name}")]
    LocationNotFound { name: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TravelMapError {
    /// Create a new empty-input error for the named field
    pub fn empty_input<S: Into<String>>(field: S) -> Self {
        Self::EmptyInput {
            field: field.into(),
        }
    }

    /// Create a new location-not-found error
    pub fn location_not_found<S: Into<String>>(name: S) -> Self {
        Self::LocationNotFound { name: name.into() }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelMapError::EmptyInput { field } if field == "query" => {
                "Please enter a destination to search for".to_string()
            }
            TravelMapError::EmptyInput { .. } => {
                "Please enter both start and end locations".to_string()
            }
            TravelMapError::LocationNotFound { name } => format!(
                "Location '{name}' not found. Try popular cities like New York, Paris, Tokyo, etc."
            ),
            TravelMapError::Validation { message } => format!("Invalid input: {message}"),
            TravelMapError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TravelMapError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let empty = TravelMapError::empty_input("start");
        assert!(matches!(empty, TravelMapError::EmptyInput { ref field } if field == "start"));

        let missing = TravelMapError::location_not_found("Atlantis");
        assert!(matches!(missing, TravelMapError::LocationNotFound { .. }));

        let config_err = TravelMapError::config("bad speed");
        assert!(matches!(config_err, TravelMapError::Config { .. }));
    }

    #[test]
    fn test_user_messages() {
        let empty = TravelMapError::empty_input("end");
        assert_eq!(
            empty.user_message(),
            "Please enter both start and end locations"
        );

        let query = TravelMapError::empty_input("query");
        assert!(query.user_message().contains("search"));

        let missing = TravelMapError::location_not_found("Atlantis");
        assert!(missing.user_message().contains("Atlantis"));

        let validation = TravelMapError::validation("latitude 91 out of range");
        assert!(validation.user_message().contains("latitude 91"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TravelMapError = io_err.into();
        assert!(matches!(err, TravelMapError::Io { .. }));
    }
}
