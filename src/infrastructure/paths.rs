//! Path utilities for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`. Paths
//! coming from user configuration (`dataset_path`, `theme_file`,
//! `cuisine_file`) are written the way the user sees them and must be mapped
//! into the sandbox before use, and mapped back before being shown.

use std::path::PathBuf;

/// Returns the data directory for GF Radar files.
///
/// Resolves to `/host/.local/share/zellij/gfradar`, which is normally
/// `~/.local/share/zellij/gfradar` on the host. Trace output is written here.
///
/// # Examples
///
/// ```
/// use gfradar::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/gfradar");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("gfradar")
}

/// Maps a user-facing `~` path into the sandbox.
///
/// # Examples
///
/// ```
/// use gfradar::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/venues.json"), "/host/venues.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/data/venues.json"), "/data/venues.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Maps a sandbox path back to its user-facing `~` form for display.
///
/// # Examples
///
/// ```
/// use gfradar::infrastructure::display_path;
///
/// assert_eq!(display_path("/host/data/venues.json"), "~/data/venues.json");
/// assert_eq!(display_path("/host"), "~");
/// assert_eq!(display_path("/srv/venues.json"), "/srv/venues.json");
/// ```
#[must_use]
pub fn display_path(path: &str) -> String {
    match path.strip_prefix("/host") {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}
