//! Filter and sort state owned by the interaction controller.
//!
//! [`FilterState`] is a plain, serializable value: the controller mutates it
//! in response to user input and hands it to
//! [`compute_visible_venues`](super::compute_visible_venues), which never
//! sees anything else. A fresh state (`FilterState::default()`) restricts
//! nothing and sorts nothing.

use crate::domain::PriceTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Cuisine tab selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tag")]
pub enum CuisineFilter {
    /// No cuisine restriction.
    #[default]
    All,
    /// Restrict to one taxonomy tag such as `"noodles"`.
    Tag(String),
}

impl CuisineFilter {
    /// Builds a tag filter, normalizing the tag to lower case.
    #[must_use]
    pub fn tag(tag: impl AsRef<str>) -> Self {
        Self::Tag(tag.as_ref().trim().to_lowercase())
    }
}

/// Quick filter chip. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubFilter {
    #[default]
    None,
    /// Reorder nearest first.
    NearMe,
    /// Keep `$` and `$$` venues.
    Budget,
    /// Reorder highest rated first.
    StudentApproved,
    /// Keep verified venues.
    CertifiedGf,
}

impl SubFilter {
    /// Chip label as shown in the filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::NearMe => "Near Me",
            Self::Budget => "Budget",
            Self::StudentApproved => "Student Approved",
            Self::CertifiedGf => "Certified GF",
        }
    }
}

/// Result ordering. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Dataset order.
    #[default]
    Recommended,
    Rating,
    Distance,
    /// Ordered by distance, which stands in for delivery time.
    DeliveryTime,
}

impl SortOption {
    /// Every option in cycling order.
    pub const ALL: [Self; 4] = [
        Self::Recommended,
        Self::Rating,
        Self::Distance,
        Self::DeliveryTime,
    ];

    /// The option after this one, wrapping back to `Recommended`.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Recommended => "Recommended",
            Self::Rating => "Rating",
            Self::Distance => "Distance",
            Self::DeliveryTime => "Delivery Time",
        };
        f.write_str(label)
    }
}

/// Every user-controllable input to the filter engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Case-insensitive substring matched against name and cuisine.
    pub search_query: String,
    pub cuisine: CuisineFilter,
    pub sub_filter: SubFilter,
    pub sort: SortOption,
    /// Allowed price tiers. Empty means every tier is allowed.
    pub price_tiers: BTreeSet<PriceTier>,
    pub promo_only: bool,
}

impl FilterState {
    /// Selects a cuisine tab; selecting the active tab again clears it.
    pub fn toggle_cuisine(&mut self, cuisine: CuisineFilter) {
        self.cuisine = if self.cuisine == cuisine {
            CuisineFilter::All
        } else {
            cuisine
        };
    }

    /// Selects a sub-filter chip; selecting the active chip again clears it.
    pub fn toggle_sub_filter(&mut self, sub_filter: SubFilter) {
        self.sub_filter = if self.sub_filter == sub_filter {
            SubFilter::None
        } else {
            sub_filter
        };
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
    }

    /// Adds the tier to the allowed set, or removes it if already present.
    pub fn toggle_price(&mut self, tier: PriceTier) {
        if !self.price_tiers.remove(&tier) {
            self.price_tiers.insert(tier);
        }
    }

    pub fn toggle_promo(&mut self) {
        self.promo_only = !self.promo_only;
    }

    /// Whether any narrowing or reordering is active.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
