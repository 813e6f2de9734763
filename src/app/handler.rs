//! Event handling and state transition logic.
//!
//! [`handle_event`] is the interaction controller. It maps each user or
//! runtime event onto [`AppState`] mutations and returns the side effects the
//! runtime should perform. Every event that touches [`FilterState`] ends in
//! [`AppState::recompute`], so the list and the map never disagree.
//!
//! # Event Types
//!
//! - **Filters**: `SelectCuisine`, `SelectSubFilter`, `SetSort`, `CycleSort`,
//!   `TogglePrice`, `TogglePromo`, `ClearFilters`
//! - **Search**: `SearchMode`, `Char`, `Backspace`, `SubmitSearch`, `ExitSearch`
//! - **Navigation**: `KeyUp`, `KeyDown`, `TogglePopup`, `CycleViewMode`
//! - **Map**: `ZoomIn`, `ZoomOut`, `Recenter`, `LocationResolved`, `LocationFailed`
//! - **Lifecycle**: `Mount`, `Reload`, `Teardown`, `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use gfradar::app::{handle_event, Action, AppState, Event};
//! use gfradar::filter::CuisineTaxonomy;
//! use gfradar::ui::Theme;
//! use gfradar::worker::DatasetSpec;
//!
//! let mut state = AppState::new(Theme::default(), CuisineTaxonomy::default(), DatasetSpec::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), gfradar::domain::GfRadarError>(())
//! ```
//!
//! [`FilterState`]: crate::filter::FilterState

use super::modes::InputMode;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::PriceTier;
use crate::filter::{CuisineFilter, FilterState, SortOption, SubFilter};
use crate::ui::map::LatLng;
use crate::worker::WorkerResponse;

/// Events triggered by user input, runtime callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Selects a cuisine tab, or clears it if already active.
    SelectCuisine(CuisineFilter),
    /// Selects a sub-filter chip, or clears it if already active.
    SelectSubFilter(SubFilter),
    SetSort(SortOption),
    /// Advances to the next sort option.
    CycleSort,
    /// Adds or removes a price tier from the allowed set.
    TogglePrice(PriceTier),
    TogglePromo,
    /// Restores every filter to its default and leaves search mode.
    ClearFilters,

    /// Opens the search bar, keeping the current query.
    SearchMode,
    /// Keeps the query and returns to normal mode.
    SubmitSearch,
    /// Clears the query and returns to normal mode.
    ExitSearch,
    /// Appends a character to the search query.
    Char(char),
    /// Removes the last character from the search query.
    Backspace,

    /// Moves selection down by one (wraps to top).
    KeyDown,
    /// Moves selection up by one (wraps to bottom).
    KeyUp,
    /// Opens or closes the selected venue's popup.
    TogglePopup,
    CycleViewMode,

    ZoomIn,
    ZoomOut,
    /// Asks for the device position to recenter the map.
    Recenter,
    /// The geolocation provider answered.
    LocationResolved(LatLng),
    /// The geolocation provider failed. The map stays where it is.
    LocationFailed { reason: String },

    /// A venue photo failed to load.
    ImageLoadFailed { venue_id: u32 },

    /// The view came on screen.
    Mount,
    /// Refetches the dataset, keeping the current filters.
    Reload,
    /// The view is going away.
    Teardown,

    /// Wraps a response from the background worker.
    WorkerResponse(WorkerResponse),

    /// Hides the plugin pane.
    CloseFocus,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(should_render, actions)`. Actions must be executed in order.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that need to
/// validate runtime input.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::SelectCuisine(cuisine) => {
            update_filters(state, |filters| filters.toggle_cuisine(cuisine.clone()));
            Ok((true, vec![]))
        }
        Event::SelectSubFilter(sub_filter) => {
            update_filters(state, |filters| filters.toggle_sub_filter(*sub_filter));
            Ok((true, vec![]))
        }
        Event::SetSort(sort) => {
            update_filters(state, |filters| filters.set_sort(*sort));
            Ok((true, vec![]))
        }
        Event::CycleSort => {
            update_filters(state, FilterState::cycle_sort);
            Ok((true, vec![]))
        }
        Event::TogglePrice(tier) => {
            update_filters(state, |filters| filters.toggle_price(*tier));
            Ok((true, vec![]))
        }
        Event::TogglePromo => {
            update_filters(state, FilterState::toggle_promo);
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            if state.filters.is_default() && state.input_mode == InputMode::Normal {
                return Ok((false, vec![]));
            }
            tracing::debug!("clearing filters");
            state.input_mode = InputMode::Normal;
            update_filters(state, |filters| *filters = FilterState::default());
            Ok((true, vec![]))
        }

        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            tracing::debug!(query = %state.filters.search_query, "search submitted");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.filters.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            update_filters(state, |filters| filters.search_query.clear());
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            update_filters(state, |filters| filters.search_query.push(*c));
            tracing::trace!(query = %state.filters.search_query, char = %c, "search query updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            update_filters(state, |filters| {
                filters.search_query.pop();
            });
            Ok((true, vec![]))
        }

        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::TogglePopup => Ok((state.toggle_popup(), vec![])),
        Event::CycleViewMode => {
            state.view_mode = state.view_mode.next();
            tracing::debug!(view_mode = ?state.view_mode, "view mode changed");
            Ok((true, vec![]))
        }

        Event::ZoomIn => Ok((state.viewport.zoom_in(), vec![])),
        Event::ZoomOut => Ok((state.viewport.zoom_out(), vec![])),
        Event::Recenter => Ok((false, vec![Action::LocateDevice])),
        Event::LocationResolved(position) => {
            state.recenter_on(*position);
            Ok((true, vec![]))
        }
        Event::LocationFailed { reason } => {
            tracing::warn!(reason = %reason, "could not determine device position");
            Ok((false, vec![]))
        }

        Event::ImageLoadFailed { venue_id } => {
            let changed = state.mark_image_failed(*venue_id);
            if changed {
                tracing::debug!(venue_id, "venue photo replaced with placeholder");
            }
            Ok((changed, vec![]))
        }

        Event::Mount => {
            let message = state.mount();
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::Reload => {
            if !state.mounted {
                return Ok((false, vec![]));
            }
            tracing::debug!("reloading venues");
            let message = state.begin_load();
            Ok((true, vec![Action::PostToWorker(message)]))
        }
        Event::Teardown => {
            state.teardown();
            Ok((false, vec![]))
        }

        Event::WorkerResponse(response) => Ok((state.apply_response(response), vec![])),

        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
    }
}

/// Applies `change` to the filters and recomputes the visible list.
fn update_filters(state: &mut AppState, change: impl FnOnce(&mut FilterState)) {
    change(&mut state.filters);
    state.recompute();
}
