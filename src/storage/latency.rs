//! Artificial fetch delay.
//!
//! Wraps another [`VenueSource`] and sleeps before each fetch, standing in
//! for network latency so the loading state can be exercised against local
//! data.

use crate::domain::error::Result;
use crate::domain::Venue;
use crate::storage::backend::VenueSource;
use std::time::Duration;

/// Decorator that delays every fetch of the inner source.
pub struct SimulatedLatency<S> {
    inner: S,
    delay: Duration,
}

impl<S: VenueSource> SimulatedLatency<S> {
    #[must_use]
    pub const fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: VenueSource> VenueSource for SimulatedLatency<S> {
    fn fetch_venues(&mut self) -> Result<Vec<Venue>> {
        if !self.delay.is_zero() {
            tracing::trace!(delay_ms = self.delay.as_millis(), "simulating fetch latency");
            std::thread::sleep(self.delay);
        }
        self.inner.fetch_venues()
    }

    fn describe(&self) -> String {
        format!("{} (+{}ms)", self.inner.describe(), self.delay.as_millis())
    }
}
