//! Device position lookup.
//!
//! The map's locate control asks a [`GeolocationProvider`] for the current
//! position. A failure is never surfaced as an error state; the controller
//! logs it and leaves the map where it is.

use crate::domain::{GfRadarError, Result};
use crate::ui::map::LatLng;

/// Source of the device's current position.
pub trait GeolocationProvider {
    /// Returns the current position.
    ///
    /// # Errors
    ///
    /// Returns [`GfRadarError::Geolocation`] when the position is unavailable
    /// or access was denied.
    fn current_position(&self) -> Result<LatLng>;
}

/// Provider reporting a fixed, configured position.
///
/// The plugin sandbox has no positioning hardware, so the "home" position
/// from configuration stands in for it. With nothing configured the provider
/// reports the position as unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedLocation {
    position: Option<LatLng>,
}

impl FixedLocation {
    #[must_use]
    pub const fn new(position: Option<LatLng>) -> Self {
        Self { position }
    }

    /// Builds a provider from optional configured coordinates. Both must be
    /// present and within WGS84 bounds.
    #[must_use]
    pub fn from_coordinates(lat: Option<f64>, lng: Option<f64>) -> Self {
        let position = match (lat, lng) {
            (Some(lat), Some(lng)) if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) => {
                Some(LatLng::new(lat, lng))
            }
            (None, None) => None,
            (lat, lng) => {
                tracing::warn!(?lat, ?lng, "ignoring incomplete or out-of-range home position");
                None
            }
        };
        Self { position }
    }
}

impl GeolocationProvider for FixedLocation {
    fn current_position(&self) -> Result<LatLng> {
        self.position
            .ok_or_else(|| GfRadarError::Geolocation("no home position configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_position() {
        let provider = FixedLocation::from_coordinates(Some(1.3041), Some(103.8316));
        let position = provider.current_position().unwrap();
        assert!((position.lng - 103.8316).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_or_invalid_position_is_unavailable() {
        for (lat, lng) in [(None, None), (Some(1.3), None), (Some(91.0), Some(103.0))] {
            let err = FixedLocation::from_coordinates(lat, lng).current_position().unwrap_err();
            assert!(matches!(err, GfRadarError::Geolocation(_)));
        }
    }
}
