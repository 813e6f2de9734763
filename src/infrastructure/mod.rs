//! Infrastructure layer for the plugin sandbox environment.
//!
//! - [`paths`]: mapping user paths into and out of the `/host` mount
//! - [`geolocation`]: the device position provider behind the locate control

pub mod geolocation;
pub mod paths;

pub use geolocation::{FixedLocation, GeolocationProvider};
pub use paths::{display_path, expand_tilde, get_data_dir};
