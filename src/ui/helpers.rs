//! Shared rendering utilities.
//!
//! Components write into a `String` frame buffer rather than straight to
//! stdout, so a frame can be inspected in tests and printed in one go by the
//! plugin. Widths are counted in characters, not bytes.
//!
//! # Example
//!
//! ```rust
//! use gfradar::ui::helpers::{position_cursor, push_highlighted_text};
//! use gfradar::ui::Theme;
//!
//! let theme = Theme::default();
//! let mut out = String::new();
//! position_cursor(&mut out, 5, 1);
//! push_highlighted_text(&mut out, "Campus Bowl", &[(7, 11)], &theme, false);
//! assert!(out.starts_with("\u{1b}[5;1H"));
//! ```

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Width of `text` in terminal cells.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Appends `count` spaces.
pub fn pad(out: &mut String, count: usize) {
    out.extend(std::iter::repeat(' ').take(count));
}

/// Appends `text` centered in `cols`, padded on both sides.
pub fn push_centered(out: &mut String, text: &str, cols: usize) {
    let len = text_width(text).min(cols);
    let left = cols.saturating_sub(len) / 2;
    pad(out, left);
    out.extend(text.chars().take(len));
    pad(out, cols.saturating_sub(left + len));
}

/// Appends `text` with character `ranges` highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive. On a selected
/// row highlighting is skipped so it does not fight the selection colors.
pub fn push_highlighted_text(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}
