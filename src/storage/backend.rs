//! Venue source abstraction.
//!
//! This module defines the [`VenueSource`] trait that abstracts over where the
//! venue dataset comes from. The worker owns one source for its lifetime and
//! calls it once per load request; nothing else in the crate touches I/O.

use crate::domain::error::Result;
use crate::domain::Venue;

/// Something that can produce the full venue dataset.
///
/// # Implementations
///
/// - [`BuiltinVenues`](crate::storage::BuiltinVenues): the embedded dataset
/// - [`JsonVenueFile`](crate::storage::JsonVenueFile): a JSON file on disk
/// - [`SimulatedLatency`](crate::storage::SimulatedLatency): delays another source
///
/// # Examples
///
/// ```
/// use gfradar::storage::{BuiltinVenues, VenueSource};
///
/// let mut source = BuiltinVenues::new();
/// let venues = source.fetch_venues()?;
/// assert!(!venues.is_empty());
/// # Ok::<(), gfradar::domain::GfRadarError>(())
/// ```
pub trait VenueSource: Send {
    /// Fetches every venue in dataset order.
    ///
    /// Implementations never substitute an empty list for a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be read or decoded.
    fn fetch_venues(&mut self) -> Result<Vec<Venue>>;

    /// Short description for logs, e.g. a file path.
    fn describe(&self) -> String;
}

impl<S: VenueSource + ?Sized> VenueSource for Box<S> {
    fn fetch_venues(&mut self) -> Result<Vec<Venue>> {
        (**self).fetch_venues()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
