//! Venue popup renderer.
//!
//! A bordered box drawn over the body for the selected venue:
//!
//! ```text
//! ╭──────────────────────────────────────╮
//! │ ● Green Earth Café                   │
//! │ Asian Fusion • $$                    │
//! │ GF: Dedicated GF menu                │
//! │ https://images.unsplash.com/photo-1… │
//! ╰──────────────────────────────────────╯
//! ```

use crate::ui::helpers::{pad, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{truncate, PopupInfo};

const POPUP_MAX_WIDTH: usize = 48;

/// Box height including borders.
pub const POPUP_HEIGHT: usize = 6;

/// Renders the popup with its top-left corner at (`row`, `col`).
pub fn render_popup(out: &mut String, row: usize, col: usize, popup: &PopupInfo, theme: &Theme, cols: usize) {
    let width = POPUP_MAX_WIDTH.min(cols.saturating_sub(col.saturating_sub(1)));
    if width < 6 {
        return;
    }
    let inner = width - 4;
    let border = Theme::fg(&theme.colors.popup_border);

    position_cursor(out, row, col);
    out.push_str(&border);
    out.push_str(&format!("╭{}╮", "─".repeat(width - 2)));

    let lines = [
        (
            truncate(&format!("{} {}", popup.icon.glyph(), popup.summary.name), inner),
            Theme::bold().to_string() + &Theme::fg(theme.icon_color(popup.icon)),
        ),
        (truncate(&popup.summary.subtitle(), inner), Theme::fg(&theme.colors.text_normal)),
        (
            truncate(&format!("GF: {}", popup.summary.gf_option), inner),
            Theme::fg(&theme.colors.verified_fg),
        ),
        (truncate(&popup.thumbnail, inner), Theme::fg(&theme.colors.text_dim)),
    ];

    for (i, (text, style)) in lines.iter().enumerate() {
        position_cursor(out, row + 1 + i, col);
        out.push_str(Theme::reset());
        out.push_str(&border);
        out.push_str("│ ");
        out.push_str(style);
        out.push_str(text);
        out.push_str(Theme::reset());
        pad(out, inner.saturating_sub(text_width(text)));
        out.push_str(&border);
        out.push_str(" │");
    }

    position_cursor(out, row + POPUP_HEIGHT - 1, col);
    out.push_str(&format!("╰{}╯", "─".repeat(width - 2)));
    out.push_str(Theme::reset());
}
