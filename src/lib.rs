//! GF Radar: a Zellij plugin for finding gluten-free restaurants nearby.
//!
//! GF Radar shows a small venue dataset two ways at once, as a terminal map of
//! status-coloured markers and as a list of cards, and keeps both in sync
//! with a single set of filters:
//! - Cuisine tabs backed by a keyword taxonomy
//! - Sub-filters (near me, budget, student approved, certified GF), price
//!   tiers and a promo toggle
//! - Recommended, rating, distance and delivery-time ordering
//! - Live text search across names and cuisines
//! - Map zoom and recentering on a configured home position

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Controller
//! │  - Event handling and load lifecycle                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Filter Engine │   │ UI Layer      │   │ Worker Layer  │
//! │ (filter/)     │   │ (ui/)         │   │ (worker/)     │
//! │ - FilterState │   │ - Map binding │   │ - Venue fetch │
//! │ - Taxonomy    │   │ - List cards  │   │ - IPC bridge  │
//! │ - Pipeline    │   │ - Theming     │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Infrastructure & Domain Layers            │
//! │  - Venue sources: built-in, JSON file (storage/)    │
//! │  - Sandbox paths, geolocation (infrastructure/)     │
//! │  - Venue, price, distance, errors (domain/)         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/gfradar.wasm" {
//!         dataset_path "~/venues.json"
//!         fetch_delay_ms "300"
//!         theme "catppuccin-latte"
//!         home_lat "1.3483"
//!         home_lng "103.6831"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use gfradar::{handle_event, initialize, Action, Config, Event};
//! use gfradar::storage::{BuiltinVenues, VenueSource};
//! use gfradar::worker::WorkerResponse;
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Mount)?;
//! let Action::PostToWorker(request) = &actions[0] else { unreachable!() };
//!
//! let venues = BuiltinVenues::new().fetch_venues()?;
//! let response = WorkerResponse::VenuesLoaded { request_id: request.request_id(), venues };
//! handle_event(&mut state, &Event::WorkerResponse(response))?;
//! handle_event(&mut state, &Event::SelectSubFilter(gfradar::filter::SubFilter::Budget))?;
//! assert!(state.visible.iter().all(|v| v.price_range.is_budget()));
//! # Ok::<(), gfradar::GfRadarError>(())
//! ```

pub mod app;
pub mod domain;
pub mod filter;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, LoadState, ViewMode};
pub use domain::{GfRadarError, PriceTier, Result, Venue, VenueStatus};
pub use ui::Theme;

use filter::CuisineTaxonomy;
use infrastructure::{expand_tilde, FixedLocation};
use std::collections::BTreeMap;
use std::path::PathBuf;
use worker::DatasetSpec;

/// Plugin configuration parsed from Zellij's configuration map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// JSON venue file. The built-in dataset is used when unset.
    pub dataset_path: Option<PathBuf>,

    /// Artificial delay before each fetch completes. Default: 0
    pub fetch_delay_ms: u64,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Filter directive for spans, e.g. `debug`. `RUST_LOG` overrides it.
    pub trace_level: Option<String>,

    /// Position reported by the locate control.
    pub home_lat: Option<f64>,
    pub home_lng: Option<f64>,

    /// Path to a custom cuisine taxonomy TOML file.
    pub cuisine_file: Option<String>,
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unparseable values fall back to their defaults. Paths starting with
    /// `~` are mapped into the `/host` sandbox mount.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use gfradar::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("dataset_path".to_string(), "~/venues.json".to_string());
    /// map.insert("fetch_delay_ms".to_string(), "soon".to_string());
    /// map.insert("home_lat".to_string(), "1.35".to_string());
    ///
    /// let config = Config::from_plugin(&map);
    /// assert_eq!(config.dataset_path.unwrap().to_str(), Some("/host/venues.json"));
    /// assert_eq!(config.fetch_delay_ms, 0);
    /// assert_eq!(config.home_lat, Some(1.35));
    /// ```
    #[must_use]
    pub fn from_plugin(config: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            dataset_path: text("dataset_path").map(|p| PathBuf::from(expand_tilde(&p))),
            fetch_delay_ms: parse_or_default(config, "fetch_delay_ms").unwrap_or(0),
            theme_name: text("theme"),
            theme_file: text("theme_file").map(|p| expand_tilde(&p)),
            trace_level: text("trace_level"),
            home_lat: parse_or_default(config, "home_lat"),
            home_lng: parse_or_default(config, "home_lng"),
            cuisine_file: text("cuisine_file").map(|p| expand_tilde(&p)),
        }
    }

    /// The dataset the worker should load.
    #[must_use]
    pub fn dataset(&self) -> DatasetSpec {
        DatasetSpec {
            path: self.dataset_path.clone(),
            delay_ms: self.fetch_delay_ms,
        }
    }

    /// The geolocation provider for the locate control.
    #[must_use]
    pub fn geolocation(&self) -> FixedLocation {
        FixedLocation::from_coordinates(self.home_lat, self.home_lng)
    }

    fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }

    fn taxonomy(&self) -> CuisineTaxonomy {
        self.cuisine_file.as_ref().map_or_else(CuisineTaxonomy::default, |path| {
            CuisineTaxonomy::from_file(path).unwrap_or_else(|e| {
                tracing::warn!(cuisine_file = %path, error = %e, "failed to load cuisine taxonomy, using built-in");
                CuisineTaxonomy::default()
            })
        })
    }
}

/// Parses `key` from the map, logging and discarding unparseable values.
fn parse_or_default<T: std::str::FromStr>(config: &BTreeMap<String, String>, key: &str) -> Option<T> {
    let raw = config.get(key)?;
    let parsed = raw.trim().parse::<T>().ok();
    if parsed.is_none() {
        tracing::debug!(key, value = %raw, "ignoring invalid config value");
    }
    parsed
}

/// Builds the initial, unmounted application state from configuration.
///
/// The view starts loading on [`Event::Mount`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(?config, "initializing gfradar plugin");
    AppState::new(config.theme(), config.taxonomy(), config.dataset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure::GeolocationProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn test_empty_map_gives_defaults() {
        assert_eq!(Config::from_plugin(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = Config::from_plugin(&map(&[("fetch_delay_ms", "-5"), ("home_lat", "north"), ("home_lng", "103.68")]));
        assert_eq!(config.fetch_delay_ms, 0);
        assert_eq!(config.home_lat, None);
        assert_eq!(config.home_lng, Some(103.68));
        assert!(config.geolocation().current_position().is_err());
    }

    #[test]
    fn test_dataset_spec() {
        let config = Config::from_plugin(&map(&[("dataset_path", "/data/v.json"), ("fetch_delay_ms", "250")]));
        assert_eq!(
            config.dataset(),
            DatasetSpec {
                path: Some(PathBuf::from("/data/v.json")),
                delay_ms: 250,
            }
        );
    }

    #[test]
    fn test_initialize_resolves_theme_and_taxonomy() {
        let state = initialize(&Config::from_plugin(&map(&[("theme", "catppuccin-latte")])));
        assert_eq!(state.theme.name, "catppuccin-latte");
        assert!(!state.mounted);

        let state = initialize(&Config::from_plugin(&map(&[("theme", "nope")])));
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }

    #[test]
    fn test_custom_taxonomy_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[[cuisine]]\ntag = \"mexican\"\nlabel = \"Mexican\"\nkeywords = [\"mexican\", \"taco\"]\n")
            .unwrap();

        let config = Config {
            cuisine_file: Some(file.path().to_string_lossy().into_owned()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.taxonomy.tags().len(), 1);
        assert!(state.taxonomy.matches("mexican", "Mexican"));
    }
}
