//! Composable UI component renderers.
//!
//! Each component writes one screen region into the frame buffer and returns
//! the next free row.
//!
//! - [`header`]: title and load status
//! - [`filters`]: cuisine tabs, sub-filter, price and promo chips, sort label
//! - [`search`]: search input box
//! - [`map`]: projected markers on a dotted grid
//! - [`table`]: the venue list
//! - [`empty`]: loading, failure and no-match panels
//! - [`popup`]: selected venue summary box
//! - [`footer`]: key hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header: title]
//! [Header: status]
//! [Border]
//! [Filter bar - 3 lines]
//! [Border]
//! [Search Bar - 3 lines, search mode only]
//! [Map]                      ┐
//! [Border, split view only]  ├ body
//! [List heading + rows]      ┘
//! [Border]
//! [Footer]
//! ```

mod empty;
mod filters;
mod footer;
mod header;
mod map;
mod popup;
mod search;
mod table;

use crate::ui::helpers::{pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListPanel, UIViewModel};

use empty::{render_empty_state, render_load_error, render_loading};
use filters::render_filter_bar;
use footer::render_footer;
use header::render_header;
use map::render_map;
use popup::{render_popup, POPUP_HEIGHT};
use search::render_search_bar;
use table::{render_list_heading, render_list_rows};

/// Column of the popup's left border.
const POPUP_COL: usize = 3;

/// Draws a horizontal rule at `row`. Returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Blanks rows `from..to`.
fn clear_rows(out: &mut String, from: usize, to: usize, cols: usize) {
    for row in from..to {
        position_cursor(out, row, 1);
        pad(out, cols);
    }
}

/// Renders the whole screen for `vm` into `out`.
pub fn render_screen(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2; // Row 1 stays blank

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_filter_bar(out, current_row, &vm.filter_bar, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(out, current_row, search, theme, cols);
    }

    let body_top = current_row;
    let footer_row = rows.max(current_row + 1);
    let footer_border = footer_row - 1;

    if let Some(map) = &vm.map {
        current_row = render_map(out, current_row, map, theme);
        if vm.list.is_some() {
            current_row = render_border(out, current_row, &theme.colors.border, cols);
        }
    }

    if let Some(list) = &vm.list {
        clear_rows(out, current_row, footer_border, cols);
        render_list(out, current_row, list, theme, cols);
    }

    if let Some(popup) = &vm.popup {
        if body_top + POPUP_HEIGHT < footer_border {
            render_popup(out, body_top + 1, POPUP_COL, popup, theme, cols);
        }
    }

    render_border(out, footer_border, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}

fn render_list(out: &mut String, row: usize, list: &ListPanel, theme: &Theme, cols: usize) {
    match list {
        ListPanel::Loading => render_loading(out, row, theme, cols),
        ListPanel::Error { message, hint } => render_load_error(out, row, message, hint, theme, cols),
        ListPanel::Empty(empty) => {
            let next = render_list_heading(out, row, 0, 0, 0, theme, cols);
            render_empty_state(out, next, empty, theme, cols);
        }
        ListPanel::Rows { items, offset, total, .. } => {
            let next = render_list_heading(out, row, *offset, items.len(), *total, theme, cols);
            render_list_rows(out, next, items, theme, cols);
        }
    }
}
