//! Filter bar component renderer.
//!
//! Three rows of chips: cuisine tabs, sub-filters with the promo toggle, and
//! price tiers with the sort label. Chips that do not fit are dropped from
//! the end of their row.

use crate::ui::helpers::{pad, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Chip, FilterBarInfo};

/// Renders the filter bar. Returns the row after it.
pub fn render_filter_bar(out: &mut String, row: usize, bar: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    let mut second_row: Vec<&Chip> = bar.sub_filters.iter().collect();
    second_row.push(&bar.promo);

    render_chip_row(out, row, "Cuisine", bar.cuisine_tabs.iter(), None, theme, cols);
    render_chip_row(out, row + 1, "Filter ", second_row.into_iter(), None, theme, cols);
    render_chip_row(
        out,
        row + 2,
        "Price  ",
        bar.price_chips.iter(),
        Some(&format!("{} (o)", bar.sort_label)),
        theme,
        cols,
    );

    row + 3
}

fn render_chip_row<'a>(
    out: &mut String,
    row: usize,
    label: &str,
    chips: impl Iterator<Item = &'a Chip>,
    trailer: Option<&str>,
    theme: &Theme,
    cols: usize,
) {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&format!(" {label} "));
    let mut used = text_width(label) + 2;

    for chip in chips {
        let text = format!(" {} {} ", chip.key, chip.label);
        let width = text_width(&text) + 1;
        if used + width > cols {
            break;
        }

        if chip.active {
            out.push_str(&Theme::fg(&theme.colors.chip_active_fg));
            out.push_str(&Theme::bg(&theme.colors.chip_active_bg));
            out.push_str(Theme::bold());
            out.push_str(&text);
            out.push_str(Theme::reset());
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            out.push_str(&format!(" {} ", chip.key));
            out.push_str(&Theme::fg(&theme.colors.text_normal));
            out.push_str(&format!("{} ", chip.label));
        }
        out.push(' ');
        used += width;
    }

    if let Some(trailer) = trailer {
        let width = text_width(trailer) + 2;
        if used + width <= cols {
            pad(out, cols - used - width + 1);
            out.push_str(&Theme::fg(&theme.colors.header_fg));
            out.push_str(trailer);
            out.push(' ');
            used = cols;
        }
    }

    out.push_str(Theme::reset());
    pad(out, cols.saturating_sub(used));
}
