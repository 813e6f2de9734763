//! Venue dataset access.
//!
//! This module provides the storage abstraction for loading the venue dataset.
//! The dataset is read-only: sources produce venues, nothing writes them back.
//!
//! # Modules
//!
//! - `backend`: the [`VenueSource`] trait
//! - `builtin`: the embedded NTU/Singapore dataset
//! - `json`: JSON file-based source
//! - `latency`: artificial fetch delay decorator
//! - `models`: raw dataset records and their validation into venues

pub mod backend;
pub mod builtin;
pub mod json;
pub mod latency;
pub mod models;

pub use backend::VenueSource;
pub use builtin::BuiltinVenues;
pub use json::JsonVenueFile;
pub use latency::SimulatedLatency;
pub use models::{decode_dataset, records_into_venues, VenueRecord};
