//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML color tables. Two ship with the plugin, embedded from
//! `themes/`; a custom table can be loaded from disk with the `theme_file`
//! config key.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#a6e3a1"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#a6e3a1"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! chip_active_fg = "#1e1e2e"
//! chip_active_bg = "#a6e3a1"
//! verified_fg = "#a6e3a1"
//! check_fg = "#fab387"
//! stars_fg = "#f9e2af"
//! map_grid = "#313244"
//! popup_border = "#89b4fa"
//! ```
//!
//! # Example
//!
//! ```rust
//! use gfradar::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! let styled = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(styled.ends_with("\u{1b}[0m"));
//! # let _ = theme;
//! ```

use crate::domain::error::{GfRadarError, Result};
use crate::ui::map::MarkerIcon;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    /// Optional header background.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground.
    pub selection_fg: String,
    /// Selected row background.
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: footer, distances, captions.
    pub text_dim: String,

    /// Separator lines.
    pub border: String,

    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// "No matches" and loading messages.
    pub empty_state_fg: String,
    /// Load failure panel.
    pub error_fg: String,

    /// Active filter chip.
    pub chip_active_fg: String,
    pub chip_active_bg: String,

    /// Verified badge and marker.
    pub verified_fg: String,
    /// "Check with staff" badge and marker.
    pub check_fg: String,
    pub stars_fg: String,

    /// Map background dots.
    pub map_grid: String,
    pub popup_border: String,
}

impl Theme {
    /// Loads a built-in theme by name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GfRadarError::Theme`] if the file cannot be read or is not a
    /// complete theme table.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| GfRadarError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| GfRadarError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Color for a marker or badge of the given kind.
    #[must_use]
    pub fn icon_color(&self, icon: MarkerIcon) -> &str {
        match icon {
            MarkerIcon::Verified => &self.colors.verified_fg,
            MarkerIcon::Check => &self.colors.check_fg,
            MarkerIcon::Default => &self.colors.text_dim,
        }
    }

    /// Converts a hex color to an RGB tuple, falling back to white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the built-in Catppuccin Mocha theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_themes_parse() {
        assert_eq!(Theme::default().name, "catppuccin-mocha");
        let latte = Theme::from_name("catppuccin-latte").unwrap();
        assert_eq!(latte.colors.header_bg.as_deref(), Some("#e6e9ef"));
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn test_fg_escape() {
        assert_eq!(Theme::fg("#a6e3a1"), "\u{1b}[38;2;166;227;161m");
        assert_eq!(Theme::bg("bogus"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn test_from_file_round_trip() {
        let theme = Theme::from_name("catppuccin-latte").unwrap();
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&theme).unwrap().as_bytes()).unwrap();

        assert_eq!(Theme::from_file(file.path()).unwrap(), theme);
    }

    #[test]
    fn test_from_file_rejects_partial_table() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"name = \"half\"\n[colors]\nheader_fg = \"#ffffff\"\n").unwrap();

        assert!(matches!(Theme::from_file(file.path()), Err(GfRadarError::Theme(_))));
    }
}
