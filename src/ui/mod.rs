//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! - [`viewmodel`]: display-ready types, no business logic
//! - [`map`]: marker layer, viewport and projection
//! - [`renderer`]: top-level rendering entry point
//! - [`components`]: per-region renderers
//! - [`helpers`]: cursor, padding and highlight utilities
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod map;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use map::{LatLng, Marker, MarkerIcon, MarkerLayer, PopupSummary, Viewport};
pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListPanel, SearchBarInfo, UIViewModel};
