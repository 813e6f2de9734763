//! Venue list renderer.
//!
//! One row per venue:
//!
//! ```text
//! ● Green Earth Café        Verified          ★★★★☆ 4.0 (120)   300m  $$   Asian Fusion  GF menu available
//! ```
//!
//! The gf-option text fills whatever width the cuisine leaves.
//!
//! The name column carries search highlights; the badge takes the status
//! color; the stars take `stars_fg`. Selected rows are drawn in selection
//! colors across the full width.

use crate::ui::helpers::{pad, position_cursor, push_highlighted_text, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{star_bar, truncate, DisplayItem};

const NAME_WIDTH: usize = 26;
const BADGE_WIDTH: usize = 18;
const RATING_WIDTH: usize = 18;
const DISTANCE_WIDTH: usize = 7;
const PRICE_WIDTH: usize = 6;
const CUISINE_WIDTH: usize = 18;
const GF_SEPARATOR: &str = "  ";

/// Renders the list heading with a position counter. Returns the next row.
pub fn render_list_heading(
    out: &mut String,
    row: usize,
    offset: usize,
    shown: usize,
    total: usize,
    theme: &Theme,
    cols: usize,
) -> usize {
    let heading = " Nearby Gluten-Free Options";
    let counter = if total == 0 {
        String::new()
    } else {
        format!("{}-{} of {} ", offset + 1, offset + shown, total)
    };

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(heading);
    out.push_str(Theme::reset());
    pad(out, cols.saturating_sub(text_width(heading) + text_width(&counter)));
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&counter);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders every row in `items`. Returns the row after the last one.
pub fn render_list_rows(out: &mut String, row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_list_row(out, current_row, item, theme, cols);
    }
    current_row
}

fn render_list_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    let accent = |color: &str| if item.is_selected { base.clone() } else { Theme::fg(color) };

    out.push_str(&base);
    out.push_str(&accent(theme.icon_color(item.icon)));
    out.push(' ');
    out.push(item.icon.glyph());
    out.push(' ');
    out.push_str(&base);

    let name = truncate(&item.name, NAME_WIDTH - 1);
    push_highlighted_text(out, &name, &item.highlight_ranges, theme, item.is_selected);
    out.push_str(&base);
    pad(out, NAME_WIDTH.saturating_sub(text_width(&name)));
    let mut used = 3 + NAME_WIDTH;

    let badge = item.badge.unwrap_or("");
    out.push_str(&accent(theme.icon_color(item.icon)));
    out.push_str(&format!("{badge:<BADGE_WIDTH$}"));
    used += BADGE_WIDTH.max(text_width(badge));

    out.push_str(&accent(&theme.colors.stars_fg));
    out.push_str(&star_bar(item.stars));
    out.push_str(&base);
    let rating = format!(" {}", item.rating_text);
    out.push_str(&format!("{rating:<width$}", width = RATING_WIDTH - 5));
    used += 5 + (RATING_WIDTH - 5).max(text_width(&rating));

    out.push_str(&accent(&theme.colors.text_dim));
    out.push_str(&format!("{:<DISTANCE_WIDTH$}", item.distance));
    out.push_str(&base);
    out.push_str(&format!("{:<PRICE_WIDTH$}", item.price));
    used += DISTANCE_WIDTH.max(text_width(&item.distance)) + PRICE_WIDTH.max(text_width(&item.price));

    let cuisine = truncate(&item.cuisine, CUISINE_WIDTH.min(cols.saturating_sub(used)));
    out.push_str(&cuisine);
    used += text_width(&cuisine);

    let remaining = cols.saturating_sub(used);
    if !item.gf_option.is_empty() && remaining > GF_SEPARATOR.len() {
        let gf_option = truncate(&item.gf_option, remaining - GF_SEPARATOR.len());
        out.push_str(&accent(&theme.colors.text_dim));
        out.push_str(GF_SEPARATOR);
        out.push_str(&gf_option);
        out.push_str(&base);
        used += GF_SEPARATOR.len() + text_width(&gf_option);
    }

    pad(out, cols.saturating_sub(used));
    out.push_str(Theme::reset());
    row + 1
}
