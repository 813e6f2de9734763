//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the [`UIViewModel`] from [`AppState`],
//! then hand it to the components, which write ANSI output into one frame
//! buffer. The plugin prints the frame in a single call.
//!
//! # Example
//!
//! ```rust
//! use gfradar::app::AppState;
//! use gfradar::filter::CuisineTaxonomy;
//! use gfradar::ui::{render, Theme};
//! use gfradar::worker::DatasetSpec;
//!
//! let state = AppState::new(Theme::default(), CuisineTaxonomy::default(), DatasetSpec::default());
//! let frame = render(&state, 24, 80);
//! assert!(frame.contains("GF Radar Map"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI for a `rows` x `cols` pane and returns the frame.
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize) -> String {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

/// Renders a pre-computed view model.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::with_capacity(rows * cols * 4);
    components::render_screen(&mut out, vm, theme, rows, cols);
    out
}
