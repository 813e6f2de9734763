//! Placeholder panels for the list body: loading, load failure and no matches.
//!
//! Each draws a two-line centered message a couple of rows into the body.
//! The failure panel uses `error_fg` so it never reads as an empty result.

use crate::ui::helpers::{position_cursor, push_centered};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Rows between the top of the body and the message.
const TOP_MARGIN: usize = 2;

pub fn render_loading(out: &mut String, row: usize, theme: &Theme, cols: usize) {
    render_message(
        out,
        row,
        "Finding gluten-free spots…",
        "",
        &theme.colors.empty_state_fg,
        theme,
        cols,
    );
}

pub fn render_load_error(out: &mut String, row: usize, message: &str, hint: &str, theme: &Theme, cols: usize) {
    render_message(out, row, message, hint, &theme.colors.error_fg, theme, cols);
}

pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    render_message(
        out,
        row,
        &empty.message,
        &empty.subtitle,
        &theme.colors.empty_state_fg,
        theme,
        cols,
    );
}

fn render_message(out: &mut String, row: usize, message: &str, subtitle: &str, color: &str, theme: &Theme, cols: usize) {
    position_cursor(out, row + TOP_MARGIN, 1);
    out.push_str(&Theme::fg(color));
    push_centered(out, message, cols);
    out.push_str(Theme::reset());

    if subtitle.is_empty() {
        return;
    }

    position_cursor(out, row + TOP_MARGIN + 1, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, subtitle, cols);
    out.push_str(Theme::reset());
}
