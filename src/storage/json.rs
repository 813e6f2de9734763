//! JSON file venue source.
//!
//! Reads a dataset file containing a JSON array of venue records in the same
//! camelCase shape as the embedded dataset:
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "name": "Green Earth Café",
//!     "status": "verified",
//!     "distance": "300m",
//!     "priceRange": "$$",
//!     "cuisine": "Asian Fusion",
//!     "rating": 4,
//!     "reviewCount": 42,
//!     "gfOption": "GF menu available",
//!     "image": "https://…",
//!     "lat": 1.3513,
//!     "lng": 103.6851,
//!     "hasPromo": true
//!   }
//! ]
//! ```
//!
//! The file is re-read on every fetch, so edits show up on the next reload.

use crate::domain::error::{GfRadarError, Result};
use crate::domain::Venue;
use crate::infrastructure::paths::display_path;
use crate::storage::backend::VenueSource;
use crate::storage::models::decode_dataset;
use std::path::PathBuf;

/// Venue source backed by a JSON file on disk.
pub struct JsonVenueFile {
    /// Path to the dataset file.
    file_path: PathBuf,
}

impl JsonVenueFile {
    /// Creates a source for `file_path`. The file is not touched until the
    /// first fetch.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gfradar::storage::{JsonVenueFile, VenueSource};
    /// use std::path::PathBuf;
    ///
    /// let mut source = JsonVenueFile::new(PathBuf::from("/tmp/venues.json"));
    /// let venues = source.fetch_venues()?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }
}

impl VenueSource for JsonVenueFile {
    fn fetch_venues(&mut self) -> Result<Vec<Venue>> {
        let _span = tracing::debug_span!("json_fetch_venues", path = ?self.file_path).entered();

        let contents = std::fs::read_to_string(&self.file_path).map_err(|e| {
            GfRadarError::Storage(format!(
                "failed to read {}: {e}",
                self.file_path.display()
            ))
        })?;

        let venues = decode_dataset(&contents)?;
        tracing::debug!(count = venues.len(), "loaded venue file");
        Ok(venues)
    }

    fn describe(&self) -> String {
        display_path(&self.file_path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_dataset_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 1, "name": "Sarnies", "status": "check", "distance": "7.2km",
                  "priceRange": "$$", "cuisine": "Cafe", "rating": 4.1, "reviewCount": 57,
                  "gfOption": "GF bread available upon request", "image": "",
                  "lat": 1.3113, "lng": 103.9385, "hasPromo": true}}
            ]"#
        )
        .unwrap();

        let mut source = JsonVenueFile::new(file.path().to_path_buf());
        let venues = source.fetch_venues().unwrap();
        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].name, "Sarnies");
        assert_eq!(venues[0].has_promo, Some(true));
    }

    #[test]
    fn test_describe_shows_host_path() {
        let source = JsonVenueFile::new(PathBuf::from("/host/data/venues.json"));
        assert_eq!(source.describe(), "~/data/venues.json");
    }

    #[test]
    fn test_missing_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = JsonVenueFile::new(dir.path().join("missing.json"));
        let err = source.fetch_venues().unwrap_err();
        assert!(matches!(err, GfRadarError::Storage(_)));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_invalid_json_is_dataset_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let mut source = JsonVenueFile::new(file.path().to_path_buf());
        assert!(matches!(source.fetch_venues(), Err(GfRadarError::Dataset(_))));
    }

    #[test]
    fn test_refetch_sees_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("venues.json");
        std::fs::write(&path, "[]").unwrap();

        let mut source = JsonVenueFile::new(path.clone());
        assert!(source.fetch_venues().unwrap().is_empty());

        std::fs::write(
            &path,
            r#"[{"id": 5, "name": "Pure Kitchen", "priceRange": "$$$", "lat": 1.3533, "lng": 103.6821}]"#,
        )
        .unwrap();
        assert_eq!(source.fetch_venues().unwrap().len(), 1);
    }
}
