//! Cuisine taxonomy: the keyword table behind the cuisine tabs.
//!
//! Venue cuisines are free text ("Healthy Drinks", "Coffee & Snacks"), so a
//! tab cannot be an exact match. Instead each tag owns a list of keywords and
//! a venue belongs to the tag when its lower-cased cuisine contains any of
//! them. This is a fuzzy classifier: buckets overlap, and a venue whose
//! cuisine mentions none of the keywords appears only under "All".
//!
//! The built-in table is embedded from `data/cuisines.toml`. A replacement
//! table with the same shape can be loaded with [`CuisineTaxonomy::from_file`].

use crate::domain::{GfRadarError, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

const BUILTIN_TAXONOMY: &str = include_str!("../../data/cuisines.toml");

/// One cuisine tab.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CuisineTag {
    /// Lower-case identifier, e.g. `"noodles"`.
    pub tag: String,
    /// Display label, e.g. `"Noodles"`.
    pub label: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    cuisine: Vec<CuisineTag>,
}

/// Ordered keyword table mapping cuisine tags to cuisine keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuisineTaxonomy {
    tags: Vec<CuisineTag>,
}

impl CuisineTaxonomy {
    /// Parses a taxonomy from TOML text.
    ///
    /// Tags and keywords are normalized to lower case. Duplicate tags keep
    /// their first definition.
    ///
    /// # Errors
    ///
    /// Returns [`GfRadarError::Config`] if the TOML is malformed or a tag has
    /// no keywords.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: TaxonomyFile = toml::from_str(contents)
            .map_err(|e| GfRadarError::Config(format!("invalid cuisine table: {e}")))?;

        let mut tags: Vec<CuisineTag> = Vec::with_capacity(file.cuisine.len());
        for mut entry in file.cuisine {
            entry.tag = entry.tag.trim().to_lowercase();
            entry.keywords = entry
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();

            if entry.keywords.is_empty() {
                return Err(GfRadarError::Config(format!(
                    "cuisine tag {:?} has no keywords",
                    entry.tag
                )));
            }
            if tags.iter().any(|t| t.tag == entry.tag) {
                tracing::warn!(tag = %entry.tag, "duplicate cuisine tag ignored");
                continue;
            }
            tags.push(entry);
        }

        Ok(Self { tags })
    }

    /// Loads a taxonomy from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    /// Shared instance of the built-in table.
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<CuisineTaxonomy> = OnceLock::new();
        BUILTIN.get_or_init(Self::default)
    }

    /// Tabs in display order.
    #[must_use]
    pub fn tags(&self) -> &[CuisineTag] {
        &self.tags
    }

    /// Looks up a tab by tag.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&CuisineTag> {
        self.tags.iter().find(|t| t.tag == tag)
    }

    /// Whether `cuisine` falls under `tag`.
    ///
    /// A tag missing from the table is treated as its own single keyword, so
    /// a stale tag still narrows sensibly instead of matching nothing.
    #[must_use]
    pub fn matches(&self, tag: &str, cuisine: &str) -> bool {
        let cuisine = cuisine.to_lowercase();
        match self.get(tag) {
            Some(entry) => entry.keywords.iter().any(|k| cuisine.contains(k.as_str())),
            None => cuisine.contains(tag),
        }
    }
}

impl Default for CuisineTaxonomy {
    /// Returns the built-in table.
    ///
    /// # Panics
    ///
    /// Panics if the embedded table fails to parse (should never occur).
    fn default() -> Self {
        Self::from_toml(BUILTIN_TAXONOMY).expect("Built-in cuisine table should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tags_in_display_order() {
        let tags: Vec<&str> = CuisineTaxonomy::builtin()
            .tags()
            .iter()
            .map(|t| t.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["drinks", "bakery", "local", "burgers", "breakfast", "noodles"]);
    }

    #[test]
    fn test_local_bucket_keywords() {
        let taxonomy = CuisineTaxonomy::builtin();
        assert!(taxonomy.matches("local", "Hawker Centre"));
        assert!(taxonomy.matches("local", "Singaporean"));
        assert!(taxonomy.matches("local", "Malaysian Street Food"));
        assert!(!taxonomy.matches("local", "Modern European"));
    }

    #[test]
    fn test_buckets_overlap() {
        let taxonomy = CuisineTaxonomy::builtin();
        assert!(taxonomy.matches("drinks", "Coffee & Snacks"));
        assert!(taxonomy.matches("breakfast", "Coffee & Snacks"));
    }

    #[test]
    fn test_unknown_tag_matches_itself() {
        let taxonomy = CuisineTaxonomy::builtin();
        assert!(taxonomy.matches("mexican", "Mexican"));
        assert!(!taxonomy.matches("mexican", "Raw Food"));
    }

    #[test]
    fn test_custom_table_normalizes_and_validates() {
        let taxonomy = CuisineTaxonomy::from_toml(
            r#"
            [[cuisine]]
            tag = "Raw"
            label = "Raw"
            keywords = [" RAW ", "vegan"]
            "#,
        )
        .unwrap();
        assert!(taxonomy.matches("raw", "Raw Food"));
        assert!(taxonomy.matches("raw", "Vegetarian/Vegan"));

        let err = CuisineTaxonomy::from_toml(
            r#"
            [[cuisine]]
            tag = "empty"
            label = "Empty"
            keywords = []
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, GfRadarError::Config(_)));
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let err = CuisineTaxonomy::from_file("/nonexistent/cuisines.toml").unwrap_err();
        assert!(matches!(err, GfRadarError::Io(_)));
    }
}
