//! Error types for the GF Radar plugin.
//!
//! This module defines the centralized error type [`GfRadarError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Only a failed venue fetch is ever escalated to the user. Everything else
//! (bad distance strings, unexpected statuses, broken thumbnails) is absorbed
//! where it happens and never becomes one of these variants.

use thiserror::Error;

/// The main error type for GF Radar operations.
///
/// # Examples
///
/// ```
/// use gfradar::domain::GfRadarError;
///
/// fn validate_config() -> Result<(), GfRadarError> {
///     Err(GfRadarError::Config("home_lat must be a number".to_string()))
/// }
///
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum GfRadarError {
    /// Storage operation failed.
    ///
    /// Occurs when the venue source cannot be reached or read. The string
    /// contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Venue dataset could not be decoded.
    ///
    /// Raised when a dataset file is not valid JSON or does not have the shape
    /// of a venue list. Individual bad records do not raise this; they are
    /// skipped during conversion.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with background worker failed.
    ///
    /// Occurs when a worker message cannot be delivered or a response cannot
    /// be decoded.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Device location is unavailable or was denied.
    #[error("Geolocation error: {0}")]
    Geolocation(String),
}

/// A specialized `Result` type for GF Radar operations.
///
/// This is a type alias for `std::result::Result<T, GfRadarError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, GfRadarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_prefix() {
        let err = GfRadarError::Storage("dataset unreachable".to_string());
        assert_eq!(err.to_string(), "Storage error: dataset unreachable");

        let err = GfRadarError::Geolocation("denied".to_string());
        assert_eq!(err.to_string(), "Geolocation error: denied");
    }

    #[test]
    fn test_io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "venues.json");
        let err: GfRadarError = io_err.into();
        assert!(matches!(err, GfRadarError::Io(_)));
        assert!(err.to_string().starts_with("IO error:"));
    }
}
