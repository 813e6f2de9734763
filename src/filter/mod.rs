//! Venue filtering and sorting.
//!
//! - [`state`]: the serializable [`FilterState`] the controller mutates
//! - [`taxonomy`]: the keyword table behind the cuisine tabs
//! - [`engine`]: the pure pipeline producing the visible venue list

pub mod engine;
pub mod state;
pub mod taxonomy;

pub use engine::{compute_visible_venues, compute_visible_venues_with};
pub use state::{CuisineFilter, FilterState, SortOption, SubFilter};
pub use taxonomy::{CuisineTag, CuisineTaxonomy};
