//! Domain layer for GF Radar.
//!
//! Core types shared by the filter engine, the storage layer and the UI,
//! independent of Zellij-specific APIs or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`venue`]: Venue model and verification status
//! - [`price`]: Price tier parsing
//! - [`distance`]: Distance string parsing shared by every distance ordering
//!
//! # Examples
//!
//! ```
//! use gfradar::domain::{PriceTier, Result};
//!
//! fn budget_tier() -> Result<PriceTier> {
//!     PriceTier::parse("$").ok_or_else(|| {
//!         gfradar::domain::GfRadarError::Dataset("bad tier".to_string())
//!     })
//! }
//!
//! assert!(budget_tier().unwrap().is_budget());
//! ```

pub mod distance;
pub mod error;
pub mod price;
pub mod venue;

pub use error::{GfRadarError, Result};
pub use price::PriceTier;
pub use venue::{Venue, VenueStatus};
