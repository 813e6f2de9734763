//! Embedded venue dataset.
//!
//! Sixteen venues around NTU and central Singapore, compiled into the plugin
//! so it works with no configuration.

use crate::domain::error::Result;
use crate::domain::Venue;
use crate::storage::backend::VenueSource;
use crate::storage::models::decode_dataset;

const BUILTIN_DATASET: &str = include_str!("../../data/venues.json");

/// Venue source serving the embedded dataset.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinVenues;

impl BuiltinVenues {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl VenueSource for BuiltinVenues {
    fn fetch_venues(&mut self) -> Result<Vec<Venue>> {
        let _span = tracing::debug_span!("builtin_fetch_venues").entered();
        decode_dataset(BUILTIN_DATASET)
    }

    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VenueStatus;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_dataset_is_complete_and_unique() {
        let venues = BuiltinVenues::new().fetch_venues().unwrap();
        assert_eq!(venues.len(), 16);

        let ids: HashSet<u32> = venues.iter().map(|v| v.id).collect();
        assert_eq!(ids.len(), venues.len());
        assert!(venues.iter().all(|v| (0.0..=5.0).contains(&v.rating)));
    }

    #[test]
    fn test_builtin_dataset_statuses() {
        let venues = BuiltinVenues::new().fetch_venues().unwrap();
        assert!(venues.iter().all(|v| v.status != VenueStatus::Unknown));
        assert_eq!(venues[0].name, "Green Earth Café");
        assert_eq!(venues[5].distance, "50m");
    }
}
