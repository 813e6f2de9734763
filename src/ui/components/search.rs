//! Search bar component renderer.
//!
//! Draws a three-row box with the query, or the dimmed placeholder while the
//! query is empty:
//!
//! ```text
//!      ┌──────────────────────────────────────────┐
//!      │ Search: Gluten-Free Nasi Lemak near NTU  │
//!      └──────────────────────────────────────────┘
//! ```

use crate::ui::helpers::{pad, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{truncate, SearchBarInfo};

/// Horizontal margin on each side of the box.
const SEARCH_BOX_MARGIN: usize = 5;

const LABEL: &str = " Search: ";

/// Renders the search bar. Returns the row after the box.
pub fn render_search_bar(out: &mut String, row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    position_cursor(out, row, 1);
    pad(out, SEARCH_BOX_MARGIN);
    out.push_str(&border);
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let text_room = inner_width.saturating_sub(text_width(LABEL) + 1);
    let (text, text_color) = if search.query.is_empty() {
        (truncate(&search.placeholder, text_room), &theme.colors.text_dim)
    } else {
        (truncate(&search.query, text_room), &theme.colors.text_normal)
    };

    position_cursor(out, row + 1, 1);
    pad(out, SEARCH_BOX_MARGIN);
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(LABEL);
    out.push_str(&Theme::fg(text_color));
    out.push_str(&text);
    pad(out, inner_width.saturating_sub(text_width(LABEL) + text_width(&text)));
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    pad(out, SEARCH_BOX_MARGIN);
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}
