//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the GF Radar library and the Zellij plugin
//! system: it translates Zellij events into library events, executes the
//! returned actions and prints rendered frames.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling
//! │  └──────────────────┘   │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │   VenueWorker    │   │  ← Venue fetches
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`, request
//!    permissions
//! 2. **Mount**: once permissions resolve, and whenever the pane becomes
//!    visible again, the view mounts and posts a fetch to the worker
//! 3. **Teardown**: hiding the pane tears the view down; a fetch still in
//!    flight is ignored when it lands
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`, `Down` / `Up`: move selection
//!
//! Normal mode:
//! - `j` / `k`: move selection
//! - `Enter`: show or hide the venue popup
//! - `/`: search
//! - `1`-`9`: cuisine tabs, `0`: all cuisines
//! - `n` / `b` / `t` / `c`: Near Me, Budget, Student Approved, Certified GF
//! - `!` `@` `#` `$`: price tiers
//! - `P`: promo only
//! - `o`: cycle sort
//! - `+` / `-`: zoom, `r`: recenter on home
//! - `v`: cycle split, map and list views
//! - `R`: reload
//! - `Esc`: close popup, else reset filters
//! - `q`: close
//!
//! Search mode:
//! - characters edit the query
//! - `Enter`: keep the query, `Esc`: clear it

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use gfradar::domain::PriceTier;
use gfradar::filter::{CuisineFilter, SubFilter};
use gfradar::infrastructure::{FixedLocation, GeolocationProvider};
use gfradar::worker::{VenueWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use gfradar::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);
register_worker!(VenueWorker, gfradar_worker, GFRADAR_WORKER);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: gfradar::AppState,

    /// Answers the recenter control.
    geolocation: FixedLocation,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: gfradar::initialize(&Config::default()),
            geolocation: FixedLocation::default(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_plugin(&configuration);
        gfradar::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        self.app = gfradar::initialize(&config);
        self.geolocation = config.geolocation();

        request_permission(&[PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
            EventType::Visible,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                if matches!(permissions, PermissionStatus::Denied) {
                    tracing::warn!("disk access denied - only the built-in dataset can load");
                }
                if self.app.mounted {
                    Event::Reload
                } else {
                    Event::Mount
                }
            }
            zellij_tile::prelude::Event::Visible(true) if !self.app.mounted => Event::Mount,
            zellij_tile::prelude::Event::Visible(false) => Event::Teardown,
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        print!("{}", gfradar::ui::render(&self.app, rows, cols));
    }
}

impl State {
    /// Runs `event` through the library and executes its actions. Returns
    /// whether the UI should re-render.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                actions
                    .iter()
                    .fold(should_render, |render, action| self.execute_action(action) || render)
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match key.bare_key {
            BareKey::Down => return Some(Event::KeyDown),
            BareKey::Up => return Some(Event::KeyUp),
            _ => {}
        }

        match self.app.input_mode {
            InputMode::Search => Self::map_search_key(key.bare_key),
            InputMode::Normal => self.map_normal_key(key.bare_key),
        }
    }

    fn map_search_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Enter => Event::SubmitSearch,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_normal_key(&self, key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Char('j') => Event::KeyDown,
            BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::TogglePopup,
            BareKey::Esc if self.app.popup_open => Event::TogglePopup,
            BareKey::Esc => Event::ClearFilters,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char('0') => Event::SelectCuisine(CuisineFilter::All),
            BareKey::Char(digit @ '1'..='9') => {
                let index = digit.to_digit(10)? as usize - 1;
                let tag = self.app.taxonomy.tags().get(index)?;
                Event::SelectCuisine(CuisineFilter::tag(&tag.tag))
            }
            BareKey::Char('n') => Event::SelectSubFilter(SubFilter::NearMe),
            BareKey::Char('b') => Event::SelectSubFilter(SubFilter::Budget),
            BareKey::Char('t') => Event::SelectSubFilter(SubFilter::StudentApproved),
            BareKey::Char('c') => Event::SelectSubFilter(SubFilter::CertifiedGf),
            BareKey::Char(c @ ('!' | '@' | '#' | '$')) => {
                let level = match c {
                    '!' => 1,
                    '@' => 2,
                    '#' => 3,
                    _ => 4,
                };
                Event::TogglePrice(PriceTier::new(level)?)
            }
            BareKey::Char('P') => Event::TogglePromo,
            BareKey::Char('o') => Event::CycleSort,
            BareKey::Char('+' | '=') => Event::ZoomIn,
            BareKey::Char('-') => Event::ZoomOut,
            BareKey::Char('r') => Event::Recenter,
            BareKey::Char('R') => Event::Reload,
            BareKey::Char('v') => Event::CycleViewMode,
            _ => return None,
        })
    }

    /// Maps worker messages to application events.
    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(request_id = response.request_id(), "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes the message as JSON and sends it to the worker.
    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker message"),
        }
    }

    /// Executes an action returned from event handling. Returns whether the
    /// UI should re-render.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) -> bool {
        match action {
            Action::CloseFocus => {
                hide_self();
                false
            }
            Action::PostToWorker(message) => {
                Self::post_worker_message(message);
                false
            }
            Action::LocateDevice => {
                let reply = match self.geolocation.current_position() {
                    Ok(position) => Event::LocationResolved(position),
                    Err(e) => Event::LocationFailed { reason: e.to_string() },
                };
                self.dispatch(&reply)
            }
        }
    }
}
