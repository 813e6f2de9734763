//! Raw dataset records and their conversion into domain venues.
//!
//! [`VenueRecord`] mirrors the JSON wire shape (camelCase, price as a
//! dollar-sign string). It is kept separate from [`Venue`] so that the
//! invariants the rest of the crate relies on (unique ids, valid price tier,
//! rating within range) are established in exactly one place:
//! [`records_into_venues`].

use crate::domain::venue::MAX_RATING;
use crate::domain::{GfRadarError, PriceTier, Result, Venue, VenueStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A venue as it appears in a dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub status: VenueStatus,
    #[serde(default)]
    pub distance: String,
    pub price_range: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub gf_option: String,
    #[serde(default)]
    pub image: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_promo: Option<bool>,
}

impl VenueRecord {
    /// Converts the record into a venue, or explains why it cannot be used.
    fn into_venue(self) -> std::result::Result<Venue, String> {
        let price_range = PriceTier::parse(&self.price_range)
            .ok_or_else(|| format!("invalid price range {:?}", self.price_range))?;

        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err("non-finite coordinates".to_string());
        }

        // `+ 0.0` folds a negative zero into zero.
        let rating = if self.rating.is_finite() {
            self.rating.clamp(0.0, MAX_RATING) + 0.0
        } else {
            0.0
        };
        if (rating - self.rating).abs() > f64::EPSILON || !self.rating.is_finite() {
            tracing::warn!(
                id = self.id,
                raw_rating = self.rating,
                rating,
                "venue rating out of range, clamped"
            );
        }

        Ok(Venue {
            id: self.id,
            name: self.name,
            status: self.status,
            distance: self.distance,
            price_range,
            cuisine: self.cuisine,
            rating,
            review_count: self.review_count,
            gf_option: self.gf_option,
            image: self.image,
            lat: self.lat,
            lng: self.lng,
            has_promo: self.has_promo,
        })
    }
}

impl From<&Venue> for VenueRecord {
    fn from(venue: &Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name.clone(),
            status: venue.status,
            distance: venue.distance.clone(),
            price_range: venue.price_range.to_string(),
            cuisine: venue.cuisine.clone(),
            rating: venue.rating,
            review_count: venue.review_count,
            gf_option: venue.gf_option.clone(),
            image: venue.image.clone(),
            lat: venue.lat,
            lng: venue.lng,
            has_promo: venue.has_promo,
        }
    }
}

/// Converts raw records into venues, preserving dataset order.
///
/// Records with an unparseable price tier or non-finite coordinates are
/// skipped, ratings are clamped into `0.0..=5.0`, and a repeated id keeps
/// only its first usable record. Each correction is logged at `warn`; one bad
/// record never fails the dataset.
#[must_use]
pub fn records_into_venues(records: Vec<VenueRecord>) -> Vec<Venue> {
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);
    let mut venues = Vec::with_capacity(total);

    for record in records {
        let id = record.id;
        match record.into_venue() {
            Ok(venue) if seen.insert(id) => venues.push(venue),
            Ok(_) => tracing::warn!(id, "duplicate venue id, keeping first record"),
            Err(reason) => tracing::warn!(id, %reason, "skipping venue record"),
        }
    }

    tracing::debug!(total, kept = venues.len(), "venue records converted");
    venues
}

/// Decodes a JSON array of venue records into venues.
///
/// # Errors
///
/// Returns [`GfRadarError::Dataset`] if the text is not a JSON array of
/// records.
pub fn decode_dataset(json: &str) -> Result<Vec<Venue>> {
    let records: Vec<VenueRecord> = serde_json::from_str(json)
        .map_err(|e| GfRadarError::Dataset(format!("failed to parse venue dataset: {e}")))?;
    Ok(records_into_venues(records))
}
