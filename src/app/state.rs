//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the loaded
//! dataset, the filter state, the derived visible list, selection, map
//! viewport and load status. Every mutation that can change what is visible
//! ends in [`AppState::recompute`], which reruns the filter engine and
//! resyncs the marker layer, so the map and the list always show the same
//! venues in the same order.
//!
//! # Load Lifecycle
//!
//! ```text
//! Idle ──mount──▶ Loading{id} ──VenuesLoaded{id}──▶ Loaded
//!                     │
//!                     └────────Error{id}──────────▶ Failed
//! ```
//!
//! Only a response carrying the id of the in-flight request is applied, and
//! only while the view is mounted. Anything else is dropped.
//!
//! # Example
//!
//! ```rust
//! use gfradar::app::AppState;
//! use gfradar::filter::CuisineTaxonomy;
//! use gfradar::ui::Theme;
//! use gfradar::worker::{DatasetSpec, WorkerResponse};
//! use gfradar::storage::{BuiltinVenues, VenueSource};
//!
//! let mut state = AppState::new(Theme::default(), CuisineTaxonomy::default(), DatasetSpec::default());
//! let request = state.mount();
//! let venues = BuiltinVenues::new().fetch_venues()?;
//! assert!(state.apply_response(&WorkerResponse::VenuesLoaded { request_id: request.request_id(), venues }));
//! assert_eq!(state.visible.len(), 16);
//! let viewmodel = state.compute_viewmodel(40, 120);
//! assert!(viewmodel.list.is_some());
//! # Ok::<(), gfradar::domain::GfRadarError>(())
//! ```

use super::modes::{InputMode, ViewMode};
use crate::domain::{PriceTier, Venue};
use crate::filter::{compute_visible_venues_with, CuisineFilter, CuisineTaxonomy, FilterState, SubFilter};
use crate::ui::map::{LatLng, MarkerLayer, PopupSummary, Viewport};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    time_ago, Chip, DisplayItem, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, ListPanel, MapPanel, MapPin,
    PopupInfo, SearchBarInfo, UIViewModel, PLACEHOLDER_IMAGE,
};
use crate::worker::{DatasetSpec, WorkerMessage, WorkerResponse};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashSet;

/// Rows above the body: blank, title, status, border, three filter rows, border.
const TOP_CHROME_ROWS: usize = 8;

/// Rows below the body: border and key hints.
const FOOTER_ROWS: usize = 2;

/// Search box height.
const SEARCH_ROWS: usize = 3;

/// List heading row.
const LIST_HEADING_ROWS: usize = 1;

/// Border between map and list in split view.
const SPLIT_BORDER_ROWS: usize = 1;

/// Where the venue fetch stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Not mounted yet.
    #[default]
    Idle,

    /// A fetch is in flight.
    Loading { request_id: u64 },

    /// The dataset is in memory.
    Loaded { loaded_at: DateTime<Utc> },

    /// The last fetch failed.
    Failed { message: String },
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Full dataset in source order. Never reordered or mutated after load.
    pub venues: Vec<Venue>,

    /// Output of the filter engine for the current filters.
    pub visible: Vec<Venue>,

    pub filters: FilterState,

    /// Keyword table behind the cuisine tabs.
    pub taxonomy: CuisineTaxonomy,

    /// Index into `visible`.
    pub selected_index: usize,

    pub input_mode: InputMode,

    pub view_mode: ViewMode,

    pub load_state: LoadState,

    /// Markers mirroring `visible`.
    pub markers: MarkerLayer,

    pub viewport: Viewport,

    /// Whether the selected venue's popup is showing.
    pub popup_open: bool,

    /// Venues whose photo failed to load this session.
    pub failed_images: HashSet<u32>,

    pub theme: Theme,

    /// Dataset the worker is asked to load.
    pub dataset: DatasetSpec,

    /// Whether the view is on screen. Responses arriving while unmounted are
    /// dropped.
    pub mounted: bool,

    next_request_id: u64,
}

impl AppState {
    /// Creates an unmounted state with no data.
    #[must_use]
    pub fn new(theme: Theme, taxonomy: CuisineTaxonomy, dataset: DatasetSpec) -> Self {
        Self {
            venues: Vec::new(),
            visible: Vec::new(),
            filters: FilterState::default(),
            taxonomy,
            selected_index: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::default(),
            load_state: LoadState::Idle,
            markers: MarkerLayer::default(),
            viewport: Viewport::default(),
            popup_open: false,
            failed_images: HashSet::new(),
            theme,
            dataset,
            mounted: false,
            next_request_id: 1,
        }
    }

    /// Enters the view: resets session-scoped state and starts a fetch.
    ///
    /// Returns the message to post to the worker.
    pub fn mount(&mut self) -> WorkerMessage {
        tracing::debug!("view mounted");
        self.mounted = true;
        self.filters = FilterState::default();
        self.input_mode = InputMode::Normal;
        self.viewport = Viewport::default();
        self.selected_index = 0;
        self.begin_load()
    }

    /// Leaves the view. Any in-flight fetch is abandoned.
    pub fn teardown(&mut self) {
        tracing::debug!(load_state = ?self.load_state, "view torn down");
        self.mounted = false;
        if matches!(self.load_state, LoadState::Loading { .. }) {
            self.load_state = LoadState::Idle;
        }
    }

    /// Starts a new fetch, superseding any in flight, and clears loaded data.
    pub fn begin_load(&mut self) -> WorkerMessage {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        self.load_state = LoadState::Loading { request_id };
        self.venues.clear();
        self.clear_visible();

        tracing::debug!(request_id, "venue fetch started");
        WorkerMessage::load_venues(request_id, self.dataset.clone())
    }

    /// Whether a response to `request_id` should be applied.
    #[must_use]
    pub fn accepts_response(&self, request_id: u64) -> bool {
        self.mounted && self.load_state == LoadState::Loading { request_id }
    }

    /// Applies a worker response. Returns `true` if state changed.
    pub fn apply_response(&mut self, response: &WorkerResponse) -> bool {
        let request_id = response.request_id();
        if !self.accepts_response(request_id) {
            tracing::debug!(
                request_id,
                mounted = self.mounted,
                load_state = ?self.load_state,
                "dropping stale worker response"
            );
            return false;
        }

        match response {
            WorkerResponse::VenuesLoaded { venues, .. } => {
                tracing::info!(request_id, venue_count = venues.len(), "venues loaded");
                self.venues.clone_from(venues);
                self.failed_images.clear();
                self.load_state = LoadState::Loaded { loaded_at: Utc::now() };
                self.recompute();
            }
            WorkerResponse::Error { message, .. } => {
                tracing::error!(request_id, error = %message, "venue fetch failed");
                self.venues.clear();
                self.clear_visible();
                self.load_state = LoadState::Failed { message: message.clone() };
            }
        }
        true
    }

    fn clear_visible(&mut self) {
        self.visible.clear();
        self.markers.sync(&[]);
        self.selected_index = 0;
        self.popup_open = false;
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self.load_state, LoadState::Loaded { .. })
    }

    /// Reruns the filter engine and resyncs markers.
    ///
    /// Keeps the selected venue selected when it survives the new filters;
    /// otherwise clamps the selection. No-op until the dataset has loaded.
    pub fn recompute(&mut self) {
        if !self.is_loaded() {
            return;
        }

        let previous = self.selected_venue().map(|v| v.id);

        let visible = compute_visible_venues_with(&self.venues, &self.filters, &self.taxonomy);
        let diff = self.markers.sync(&visible);
        self.visible = visible.into_iter().cloned().collect();

        match previous.and_then(|id| self.visible.iter().position(|v| v.id == id)) {
            Some(index) => self.selected_index = index,
            None => {
                self.selected_index = self.selected_index.min(self.visible.len().saturating_sub(1));
                self.popup_open = false;
            }
        }

        tracing::debug!(
            visible = self.visible.len(),
            added = diff.added.len(),
            removed = diff.removed.len(),
            reordered = diff.reordered,
            "visible venues recomputed"
        );
    }

    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_venue(&self) -> Option<&Venue> {
        self.visible.get(self.selected_index)
    }

    /// Opens or closes the popup for the selected venue. Returns `false` when
    /// nothing is selected.
    pub fn toggle_popup(&mut self) -> bool {
        if self.selected_venue().is_none() {
            return false;
        }
        self.popup_open = !self.popup_open;
        true
    }

    /// Records a photo load failure. Returns `true` the first time per venue.
    pub fn mark_image_failed(&mut self, venue_id: u32) -> bool {
        self.failed_images.insert(venue_id)
    }

    /// Photo URL for `venue`, or the placeholder if it is missing or failed.
    #[must_use]
    pub fn thumbnail_for(&self, venue: &Venue) -> String {
        if self.failed_images.contains(&venue.id) || venue.image.trim().is_empty() {
            PLACEHOLDER_IMAGE.to_string()
        } else {
            venue.image.clone()
        }
    }

    /// Centers the map on a resolved device position.
    pub fn recenter_on(&mut self, position: LatLng) {
        tracing::debug!(lat = position.lat, lng = position.lng, "recentering map");
        self.viewport.recenter(position);
    }

    /// Computes a renderable UI view model for a terminal of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let (map_rows, list_rows) = self.body_layout(rows);

        let map = self.view_mode.shows_map().then(|| self.compute_map_panel(map_rows, cols));
        let list = self.view_mode.shows_list().then(|| self.compute_list_panel(list_rows));

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            filter_bar: self.compute_filter_bar(),
            map,
            list,
            popup: self.compute_popup(),
            footer: self.compute_footer(),
        }
    }

    /// Splits the body between map and list. Returns `(map_rows, list_rows)`,
    /// where list rows include the heading.
    fn body_layout(&self, total_rows: usize) -> (usize, usize) {
        let search_rows = if self.input_mode == InputMode::Search { SEARCH_ROWS } else { 0 };
        let body = total_rows.saturating_sub(TOP_CHROME_ROWS + FOOTER_ROWS + search_rows);

        match self.view_mode {
            ViewMode::Map => (body, 0),
            ViewMode::List => (0, body),
            ViewMode::Split => {
                let usable = body.saturating_sub(SPLIT_BORDER_ROWS);
                let map_rows = usable * 2 / 5;
                (map_rows, usable - map_rows)
            }
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let status = match &self.load_state {
            LoadState::Idle => String::new(),
            LoadState::Loading { .. } => "Loading venues…".to_string(),
            LoadState::Failed { .. } => "Venues unavailable".to_string(),
            LoadState::Loaded { loaded_at } => format!(
                "{} of {} venues • updated {}",
                self.visible.len(),
                self.venues.len(),
                time_ago(*loaded_at, Utc::now())
            ),
        };

        HeaderInfo {
            title: " GF Radar Map • Find gluten-free options near you ".to_string(),
            status,
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        (self.input_mode == InputMode::Search).then(|| SearchBarInfo {
            query: self.filters.search_query.clone(),
            placeholder: "Gluten-Free Nasi Lemak near NTU".to_string(),
        })
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        let cuisine_tabs = self
            .taxonomy
            .tags()
            .iter()
            .take(9)
            .enumerate()
            .map(|(idx, tag)| {
                let active = self.filters.cuisine == CuisineFilter::Tag(tag.tag.clone());
                Chip::new((idx + 1).to_string(), tag.label.clone(), active)
            })
            .collect();

        let sub_filters = [
            ("n", SubFilter::NearMe),
            ("b", SubFilter::Budget),
            ("t", SubFilter::StudentApproved),
            ("c", SubFilter::CertifiedGf),
        ]
        .into_iter()
        .map(|(key, sub)| Chip::new(key, sub.label(), self.filters.sub_filter == sub))
        .collect();

        let price_chips = PriceTier::all()
            .into_iter()
            .zip(["!", "@", "#", "$"])
            .map(|(tier, key)| Chip::new(key, tier.to_string(), self.filters.price_tiers.contains(&tier)))
            .collect();

        FilterBarInfo {
            cuisine_tabs,
            sub_filters,
            price_chips,
            promo: Chip::new("P", "Promo", self.filters.promo_only),
            sort_label: format!("Sort: {}", self.filters.sort),
        }
    }

    fn compute_map_panel(&self, height: usize, width: usize) -> MapPanel {
        let selected_id = self.selected_venue().map(|v| v.id);

        let pins: Vec<MapPin> = self
            .markers
            .markers()
            .iter()
            .filter_map(|marker| {
                let projected = self.viewport.project(LatLng::new(marker.lat, marker.lng), width, height);
                projected.map(|(col, row)| MapPin {
                    col,
                    row,
                    icon: marker.icon,
                    is_selected: Some(marker.venue_id) == selected_id,
                })
            })
            .collect();

        let caption = if self.markers.is_empty() {
            format!("zoom {} • no venues to show", self.viewport.zoom)
        } else {
            format!(
                "zoom {} • {:.4}, {:.4}",
                self.viewport.zoom, self.viewport.center.lat, self.viewport.center.lng
            )
        };

        MapPanel {
            width,
            height,
            offscreen: self.markers.len() - pins.len(),
            pins,
            caption,
        }
    }

    fn compute_list_panel(&self, rows: usize) -> ListPanel {
        match &self.load_state {
            LoadState::Idle | LoadState::Loading { .. } => return ListPanel::Loading,
            LoadState::Failed { message } => {
                return ListPanel::Error {
                    message: "Couldn't load gluten-free restaurants.".to_string(),
                    hint: format!("{message} • press R to retry"),
                }
            }
            LoadState::Loaded { .. } => {}
        }

        if self.visible.is_empty() {
            return ListPanel::Empty(EmptyState::default());
        }

        let available_rows = rows.saturating_sub(LIST_HEADING_ROWS).max(1);
        let total = self.visible.len();

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(total);
        if visible_end - visible_start < available_rows && total >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let query = self.filters.search_query.trim();
        let matcher = (!query.is_empty()).then(SkimMatcherV2::default);

        let items = self.visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, venue)| {
                self.compute_display_item(venue, visible_start + relative_idx, query, matcher.as_ref())
            })
            .collect();

        ListPanel::Rows {
            items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            offset: visible_start,
            total,
        }
    }

    fn compute_display_item(
        &self,
        venue: &Venue,
        absolute_idx: usize,
        query: &str,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        DisplayItem {
            venue_id: venue.id,
            name: venue.name.clone(),
            badge: venue.status.badge(),
            icon: crate::ui::map::MarkerIcon::for_status(venue.status),
            stars: venue.filled_stars(),
            rating_text: format!("{:.1} ({})", venue.rating, venue.review_count),
            distance: venue.distance.clone(),
            price: venue.price_range.to_string(),
            cuisine: venue.cuisine.clone(),
            gf_option: venue.gf_option.clone(),
            thumbnail: self.thumbnail_for(venue),
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges: matcher.map_or_else(Vec::new, |m| compute_highlight_ranges(&venue.name, query, m)),
        }
    }

    fn compute_popup(&self) -> Option<PopupInfo> {
        if !self.popup_open {
            return None;
        }
        let venue = self.selected_venue()?;
        let marker = self.markers.get(venue.id)?;
        Some(PopupInfo {
            icon: marker.icon,
            summary: PopupSummary::for_venue(venue),
            thumbnail: self.thumbnail_for(venue),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, &self.load_state) {
            (InputMode::Search, _) => "Type to search  Enter: keep query  Esc: clear  Ctrl+n/p: move".to_string(),
            (InputMode::Normal, LoadState::Failed { .. }) => "R: retry  v: view  q: quit".to_string(),
            (InputMode::Normal, _) => {
                "j/k: move  Enter: details  /: search  1-6: cuisine  o: sort  v: view  +/-: zoom  r: locate  Esc: reset  q: quit"
                    .to_string()
            }
        };
        FooterInfo { keybindings }
    }
}

/// Character ranges in `text` matched by `query`, coalesced into runs.
///
/// Returned ranges are `(start, end)` character indices with exclusive end.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
