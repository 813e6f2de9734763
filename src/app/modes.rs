//! Input and view mode state types for the application.
//!
//! These enums decide how keys are interpreted and how the screen is split
//! between the map and the venue list.
//!
//! # Example
//!
//! ```rust
//! use gfradar::app::modes::{InputMode, ViewMode};
//!
//! let input_mode = InputMode::Search;
//! assert_eq!(ViewMode::Split.next(), ViewMode::Map);
//! # let _ = input_mode;
//! ```

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Single-key commands: navigation, filter chips, map controls.
    #[default]
    Normal,

    /// Keystrokes edit the search query. Enter keeps the query and returns
    /// to Normal; Esc clears it.
    Search,
}

/// How the screen is divided between map and list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Map above the list.
    #[default]
    Split,

    /// Full-height map.
    Map,

    /// Full-height list.
    List,
}

impl ViewMode {
    /// Next mode in the `v` cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Split => Self::Map,
            Self::Map => Self::List,
            Self::List => Self::Split,
        }
    }

    #[must_use]
    pub const fn shows_map(self) -> bool {
        matches!(self, Self::Split | Self::Map)
    }

    #[must_use]
    pub const fn shows_list(self) -> bool {
        matches!(self, Self::Split | Self::List)
    }
}
