//! End-to-end flows through the controller: events in, worker round trips
//! over JSON, rendered frames out.

use std::io::Write;

use gfradar::filter::SubFilter;
use gfradar::ui::LatLng;
use gfradar::worker::{VenueWorker, WorkerMessage, WorkerResponse};
use gfradar::{handle_event, initialize, Action, AppState, Config, Event, InputMode, LoadState, ViewMode};
use tempfile::NamedTempFile;

/// Sends `message` through a worker and back over the JSON wire format.
fn round_trip(worker: &mut VenueWorker, message: &WorkerMessage) -> WorkerResponse {
    let request: WorkerMessage = serde_json::from_str(&serde_json::to_string(message).unwrap()).unwrap();
    let response = worker.handle_message(request);
    serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap()
}

fn posted(actions: Vec<Action>) -> WorkerMessage {
    match actions.as_slice() {
        [Action::PostToWorker(message)] => message.clone(),
        other => panic!("expected a single worker post, got {other:?}"),
    }
}

fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    handle_event(state, &event).unwrap()
}

fn loaded(config: &Config) -> (AppState, VenueWorker) {
    let mut state = initialize(config);
    let mut worker = VenueWorker::default();
    let (_, actions) = send(&mut state, Event::Mount);
    let response = round_trip(&mut worker, &posted(actions));
    send(&mut state, Event::WorkerResponse(response));
    (state, worker)
}

fn visible_ids(state: &AppState) -> Vec<u32> {
    state.visible.iter().map(|v| v.id).collect()
}

fn type_query(state: &mut AppState, query: &str) {
    send(state, Event::SearchMode);
    for c in query.chars() {
        send(state, Event::Char(c));
    }
    send(state, Event::SubmitSearch);
}

#[test]
fn mount_load_and_render_builtin_dataset() {
    let mut state = initialize(&Config::default());
    assert_eq!(state.load_state, LoadState::Idle);

    let (render, actions) = send(&mut state, Event::Mount);
    assert!(render);
    let message = posted(actions);
    assert!(matches!(state.load_state, LoadState::Loading { .. }));

    let loading_frame = gfradar::ui::render(&state, 40, 120);
    assert!(loading_frame.contains("Finding gluten-free spots"));

    let response = round_trip(&mut VenueWorker::default(), &message);
    let (render, _) = send(&mut state, Event::WorkerResponse(response));
    assert!(render);
    assert!(state.is_loaded());
    assert_eq!(state.visible.len(), 16);
    assert_eq!(state.markers.len(), 16);

    let frame = gfradar::ui::render(&state, 40, 120);
    assert!(frame.contains("Green Earth Café"));
    assert!(frame.contains("16 of 16 venues"));
}

#[test]
fn search_and_certified_filter_compose() {
    let (mut state, _) = loaded(&Config::default());

    type_query(&mut state, "bowl");
    assert_eq!(state.input_mode, InputMode::Normal);
    assert_eq!(visible_ids(&state), vec![2, 4, 9, 11]);

    send(&mut state, Event::SelectSubFilter(SubFilter::CertifiedGf));
    assert_eq!(visible_ids(&state), vec![4, 9]);
    assert_eq!(state.markers.len(), 2);

    let frame = gfradar::ui::render(&state, 40, 120);
    assert!(frame.contains("Nutri Bowl"));
    assert!(!frame.contains("Campus Bowl"));

    send(&mut state, Event::ClearFilters);
    assert_eq!(state.visible.len(), 16);
}

#[test]
fn no_matches_renders_empty_state() {
    let (mut state, _) = loaded(&Config::default());
    type_query(&mut state, "zzzz");

    assert!(state.visible.is_empty());
    assert!(state.markers.is_empty());
    assert!(state.selected_venue().is_none());

    let frame = gfradar::ui::render(&state, 40, 120);
    assert!(frame.contains("No gluten-free restaurants found nearby."));
}

#[test]
fn popup_follows_selection() {
    let (mut state, _) = loaded(&Config::default());
    send(&mut state, Event::KeyDown);
    assert_eq!(state.selected_venue().map(|v| v.id), Some(2));

    send(&mut state, Event::TogglePopup);
    assert!(state.popup_open);
    let frame = gfradar::ui::render(&state, 40, 120);
    assert!(frame.contains("Bowls & Salads • $"));

    send(&mut state, Event::TogglePopup);
    assert!(!state.popup_open);
}

#[test]
fn missing_dataset_file_shows_failure_then_retry_recovers() {
    let mut file = NamedTempFile::new().unwrap();
    let config = Config {
        dataset_path: Some(file.path().with_extension("missing")),
        ..Config::default()
    };
    let (mut state, mut worker) = loaded(&config);

    assert!(matches!(state.load_state, LoadState::Failed { .. }));
    assert!(state.visible.is_empty());
    let frame = gfradar::ui::render(&state, 40, 120);
    assert!(frame.contains("Couldn't load gluten-free restaurants."));
    assert!(!frame.contains("No gluten-free restaurants found nearby."));

    write!(
        file,
        r#"[{{"id": 42, "name": "Retry Café", "status": "verified", "distance": "90m",
            "priceRange": "$", "cuisine": "Bakery", "rating": 4.5, "reviewCount": 3,
            "gfOption": "Dedicated GF kitchen", "image": "", "lat": 1.35, "lng": 103.68}}]"#
    )
    .unwrap();
    state.dataset.path = Some(file.path().to_path_buf());

    let (_, actions) = send(&mut state, Event::Reload);
    let response = round_trip(&mut worker, &posted(actions));
    send(&mut state, Event::WorkerResponse(response));

    assert!(state.is_loaded());
    assert_eq!(visible_ids(&state), vec![42]);
}

#[test]
fn reload_then_teardown_ignores_late_replies() {
    let (mut state, mut worker) = loaded(&Config::default());
    type_query(&mut state, "bowl");

    let (_, first) = send(&mut state, Event::Reload);
    let first = posted(first);
    let (_, second) = send(&mut state, Event::Reload);
    let second = posted(second);
    assert_ne!(first.request_id(), second.request_id());

    let stale = round_trip(&mut worker, &first);
    let (render, _) = send(&mut state, Event::WorkerResponse(stale));
    assert!(!render);
    assert!(matches!(state.load_state, LoadState::Loading { .. }));

    send(&mut state, Event::Teardown);
    assert!(!state.mounted);
    let late = round_trip(&mut worker, &second);
    let (render, _) = send(&mut state, Event::WorkerResponse(late));
    assert!(!render);
    assert!(state.visible.is_empty());

    // Remount starts fresh.
    let (_, actions) = send(&mut state, Event::Mount);
    let response = round_trip(&mut worker, &posted(actions));
    send(&mut state, Event::WorkerResponse(response));
    assert!(state.filters.search_query.is_empty());
    assert_eq!(state.visible.len(), 16);
}

#[test]
fn recenter_round_trip_moves_viewport() {
    let (mut state, _) = loaded(&Config::default());
    send(&mut state, Event::ZoomOut);
    let zoomed_out = state.viewport.zoom;

    let (render, actions) = send(&mut state, Event::Recenter);
    assert!(!render);
    assert_eq!(actions, vec![Action::LocateDevice]);

    let home = LatLng::new(1.3483, 103.6831);
    let (render, _) = send(&mut state, Event::LocationResolved(home));
    assert!(render);
    assert_eq!(state.viewport.center, home);
    assert!(state.viewport.zoom > zoomed_out);

    let (render, _) = send(
        &mut state,
        Event::LocationFailed {
            reason: "denied".to_string(),
        },
    );
    assert!(!render);
    assert_eq!(state.viewport.center, home);
}

#[test]
fn view_modes_change_rendered_panels() {
    let (mut state, _) = loaded(&Config::default());
    assert_eq!(state.view_mode, ViewMode::Split);

    let split = state.compute_viewmodel(40, 120);
    assert!(split.map.is_some() && split.list.is_some());

    send(&mut state, Event::CycleViewMode);
    let vm = state.compute_viewmodel(40, 120);
    assert_eq!(vm.map.is_some(), state.view_mode != ViewMode::List);
    assert_eq!(vm.list.is_some(), state.view_mode != ViewMode::Map);
}

#[test]
fn quit_closes_focus() {
    let (mut state, _) = loaded(&Config::default());
    assert_eq!(send(&mut state, Event::CloseFocus), (false, vec![Action::CloseFocus]));
}
