//! Map panel renderer.
//!
//! The panel is a dotted grid with one glyph per projected marker. The
//! selected marker is drawn inverted. The top row carries the viewport caption
//! and, when some markers fall outside the viewport, how many.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{MapPanel, MapPin};

/// Columns between background dots.
const GRID_STEP_COLS: usize = 6;

/// Rows between background dots.
const GRID_STEP_ROWS: usize = 3;

/// Renders the map panel starting at `row`. Returns the row after it.
pub fn render_map(out: &mut String, row: usize, map: &MapPanel, theme: &Theme) -> usize {
    let mut cells: Vec<Vec<Option<&MapPin>>> = vec![vec![None; map.width]; map.height];
    for pin in &map.pins {
        if let Some(cell) = cells.get_mut(pin.row).and_then(|r| r.get_mut(pin.col)) {
            // The selected pin wins a shared cell.
            if !matches!(cell, Some(existing) if existing.is_selected) {
                *cell = Some(pin);
            }
        }
    }

    for (r, line) in cells.iter().enumerate() {
        position_cursor(out, row + r, 1);
        for (c, cell) in line.iter().enumerate() {
            match cell {
                Some(pin) => push_pin(out, pin, theme),
                None if r % GRID_STEP_ROWS == 1 && c % GRID_STEP_COLS == 0 => {
                    out.push_str(&Theme::fg(&theme.colors.map_grid));
                    out.push('·');
                    out.push_str(Theme::reset());
                }
                None => out.push(' '),
            }
        }
    }

    if map.height > 0 {
        render_caption(out, row, map, theme);
    }

    row + map.height
}

fn push_pin(out: &mut String, pin: &MapPin, theme: &Theme) {
    let color = theme.icon_color(pin.icon);
    if pin.is_selected {
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(color));
    } else {
        out.push_str(&Theme::fg(color));
    }
    out.push(pin.icon.glyph());
    out.push_str(Theme::reset());
}

fn render_caption(out: &mut String, row: usize, map: &MapPanel, theme: &Theme) {
    let caption = if map.offscreen > 0 {
        format!(" {} • {} off map ", map.caption, map.offscreen)
    } else {
        format!(" {} ", map.caption)
    };

    let width = text_width(&caption);
    if width > map.width {
        return;
    }

    position_cursor(out, row, map.width - width + 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&caption);
    out.push_str(Theme::reset());
}

