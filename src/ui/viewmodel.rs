//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data:
//! truncated strings, star counts, projected map cells, highlight ranges.

use crate::ui::map::{MarkerIcon, PopupSummary};
use chrono::{DateTime, Utc};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Image shown when a venue's photo is missing or failed to load.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/100x100?text=No+Image";

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present while the search bar is open.
    pub search_bar: Option<SearchBarInfo>,

    pub filter_bar: FilterBarInfo,

    /// Present when the view mode includes the map.
    pub map: Option<MapPanel>,

    /// Present when the view mode includes the list.
    pub list: Option<ListPanel>,

    /// Read-only summary of the selected venue, when open.
    pub popup: Option<PopupInfo>,

    pub footer: FooterInfo,
}

/// Title bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Load status, e.g. `"12 of 16 venues • updated 3m ago"`.
    pub status: String,
}

/// Search input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Hint shown while the query is empty.
    pub placeholder: String,
}

/// A toggleable filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    /// Key that toggles the chip.
    pub key: String,
    pub label: String,
    pub active: bool,
}

impl Chip {
    pub fn new(key: impl Into<String>, label: impl Into<String>, active: bool) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            active,
        }
    }
}

/// Cuisine tabs, sub-filter chips, price chips, promo toggle and sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarInfo {
    pub cuisine_tabs: Vec<Chip>,
    pub sub_filters: Vec<Chip>,
    pub price_chips: Vec<Chip>,
    pub promo: Chip,
    pub sort_label: String,
}

/// A marker projected onto the map panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapPin {
    pub col: usize,
    pub row: usize,
    pub icon: MarkerIcon,
    pub is_selected: bool,
}

/// The map panel.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPanel {
    pub width: usize,
    pub height: usize,
    /// Pins inside the panel, in marker order.
    pub pins: Vec<MapPin>,
    /// Markers outside the current viewport.
    pub offscreen: usize,
    /// e.g. `"zoom 15 • 1.3483, 103.6831"`.
    pub caption: String,
}

/// List body state.
#[derive(Debug, Clone, PartialEq)]
pub enum ListPanel {
    /// The dataset has not arrived yet.
    Loading,

    /// The fetch failed. Distinct from `Empty`.
    Error { message: String, hint: String },

    /// The dataset loaded but nothing matches the current filters.
    Empty(EmptyState),

    /// Rows in engine order, windowed around the selection.
    Rows {
        items: Vec<DisplayItem>,
        /// Selected row index within `items`.
        selected_index: usize,
        /// Index of `items[0]` within the full visible list.
        offset: usize,
        total: usize,
    },
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            message: "No gluten-free restaurants found nearby.".to_string(),
            subtitle: "Try adjusting your search or filters.".to_string(),
        }
    }
}

/// One venue row.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub venue_id: u32,
    pub name: String,
    /// Status badge text, `None` for unknown statuses.
    pub badge: Option<&'static str>,
    pub icon: MarkerIcon,
    /// Filled stars out of five.
    pub stars: u8,
    /// e.g. `"4.5 (78)"`.
    pub rating_text: String,
    pub distance: String,
    pub price: String,
    pub cuisine: String,
    pub gf_option: String,
    /// Photo URL, or [`PLACEHOLDER_IMAGE`] after a load failure.
    pub thumbnail: String,
    pub is_selected: bool,
    /// Character ranges in `name` matching the search query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Popup for the selected marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupInfo {
    /// Icon of the marker the popup belongs to.
    pub icon: MarkerIcon,
    pub summary: PopupSummary,
    pub thumbnail: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Renders a star bar such as `"★★★★☆"`.
///
/// # Examples
///
/// ```
/// use gfradar::ui::viewmodel::star_bar;
///
/// assert_eq!(star_bar(3), "★★★☆☆");
/// assert_eq!(star_bar(9), "★★★★★");
/// ```
#[must_use]
pub fn star_bar(filled: u8) -> String {
    let filled = usize::from(filled.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Truncates to at most `max` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Human-readable age such as `"5m ago"`.
#[must_use]
pub fn time_ago(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - since).num_seconds();

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_copy() {
        let empty = EmptyState::default();
        assert_eq!(empty.message, "No gluten-free restaurants found nearby.");
        assert_eq!(empty.subtitle, "Try adjusting your search or filters.");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Green Earth Café", 20), "Green Earth Café");
        assert_eq!(truncate("Green Earth Café", 12), "Green Earth…");
        assert_eq!(truncate("Café", 4), "Café");
        assert_eq!(truncate("Café", 0), "");
    }

    #[test]
    fn test_time_ago() {
        let now = Utc::now();
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now - chrono::Duration::seconds(300), now), "5m ago");
        assert_eq!(time_ago(now - chrono::Duration::hours(3), now), "3h ago");
        assert_eq!(time_ago(now - chrono::Duration::days(2), now), "2d ago");
    }

    #[test]
    fn test_star_bar() {
        assert_eq!(star_bar(0), "☆☆☆☆☆");
        assert_eq!(star_bar(4), "★★★★☆");
    }
}
