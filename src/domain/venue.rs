//! Venue domain model.
//!
//! A [`Venue`] is a restaurant or kiosk with gluten-free offerings. Venues are
//! read-only once loaded: the filter engine, the map layer and the list all
//! borrow them and never mutate a field.

use crate::domain::price::PriceTier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest rating a venue can carry.
pub const MAX_RATING: f64 = 5.0;

/// Gluten-free verification status of a venue.
///
/// Unexpected wire values deserialize to [`VenueStatus::Unknown`], which the
/// map and list render with a neutral icon and no badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueStatus {
    /// Gluten-free practices have been confirmed.
    Verified,
    /// Diners should check with staff before ordering.
    Check,
    #[default]
    #[serde(other)]
    Unknown,
}

impl VenueStatus {
    /// Short badge text shown next to a list row, `None` for unknown statuses.
    #[must_use]
    pub const fn badge(self) -> Option<&'static str> {
        match self {
            Self::Verified => Some("Verified"),
            Self::Check => Some("Check with staff"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for VenueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Verified => "verified",
            Self::Check => "check",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// A restaurant with gluten-free options.
///
/// # Fields
///
/// - `id`: Unique within a dataset
/// - `distance`: Presentation string such as `"300m"`; parse it with
///   [`crate::domain::distance::parse_distance_meters`]
/// - `rating`: Always within `0.0..=5.0` once it has passed the storage boundary
/// - `has_promo`: Explicit promotion flag, `None` when the source does not say
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: u32,
    pub name: String,
    pub status: VenueStatus,
    pub distance: String,
    pub price_range: PriceTier,
    pub cuisine: String,
    pub rating: f64,
    pub review_count: u32,
    pub gf_option: String,
    pub image: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub has_promo: Option<bool>,
}

impl Venue {
    /// Number of filled stars, `floor(rating)` clamped to `0..=5`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gfradar::domain::{PriceTier, Venue, VenueStatus};
    /// # let mut venue = Venue {
    /// #     id: 1, name: "Grain Traders".into(), status: VenueStatus::Verified,
    /// #     distance: "3.2km".into(), price_range: PriceTier::parse("$$").unwrap(),
    /// #     cuisine: "Bowls & Grains".into(), rating: 4.5, review_count: 78,
    /// #     gf_option: "Many GF options available".into(), image: String::new(),
    /// #     lat: 1.3041, lng: 103.8316, has_promo: None,
    /// # };
    /// assert_eq!(venue.filled_stars(), 4);
    /// venue.rating = 7.0;
    /// assert_eq!(venue.filled_stars(), 5);
    /// ```
    #[must_use]
    pub fn filled_stars(&self) -> u8 {
        if self.rating.is_nan() {
            return 0;
        }
        // Clamped to 0..=5 before the cast.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let stars = self.rating.floor().clamp(0.0, MAX_RATING) as u8;
        stars
    }

    /// Whether the venue's name or cuisine contains `needle_lower`.
    ///
    /// The needle must already be lower-cased; the engine lower-cases the
    /// query once per run rather than once per venue.
    #[must_use]
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.cuisine.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(rating: f64) -> Venue {
        Venue {
            id: 7,
            name: "Veggie Village".to_string(),
            status: VenueStatus::Verified,
            distance: "350m".to_string(),
            price_range: PriceTier::parse("$$").unwrap(),
            cuisine: "Vegetarian".to_string(),
            rating,
            review_count: 56,
            gf_option: "Most items GF, clearly marked".to_string(),
            image: String::new(),
            lat: 1.3453,
            lng: 103.6871,
            has_promo: None,
        }
    }

    #[test]
    fn test_unknown_status_absorbs_unexpected_values() {
        let status: VenueStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(status, VenueStatus::Unknown);
        assert_eq!(status.badge(), None);

        let status: VenueStatus = serde_json::from_str("\"check\"").unwrap();
        assert_eq!(status.badge(), Some("Check with staff"));
    }

    #[test]
    fn test_filled_stars_floor_and_clamp() {
        assert_eq!(venue(4.7).filled_stars(), 4);
        assert_eq!(venue(5.0).filled_stars(), 5);
        assert_eq!(venue(-1.0).filled_stars(), 0);
        assert_eq!(venue(f64::NAN).filled_stars(), 0);
    }

    #[test]
    fn test_matches_text_checks_name_and_cuisine() {
        let v = venue(4.0);
        assert!(v.matches_text("veggie"));
        assert!(v.matches_text("vegetarian"));
        assert!(!v.matches_text("ramen"));
    }
}
