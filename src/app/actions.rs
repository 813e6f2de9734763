//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never performs I/O. It mutates [`AppState`] and returns
//! a `Vec<Action>` that the runtime executes in order.
//!
//! [`AppState`]: crate::app::AppState
//!
//! # Example
//!
//! ```rust
//! use gfradar::app::Action;
//! use gfradar::worker::{DatasetSpec, WorkerMessage};
//!
//! let actions = vec![
//!     Action::PostToWorker(WorkerMessage::load_venues(1, DatasetSpec::default())),
//!     Action::LocateDevice,
//! ];
//! # let _ = actions;
//! ```

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the background worker.
    PostToWorker(WorkerMessage),

    /// Asks the geolocation provider for the device position. The runtime
    /// answers with `Event::LocationResolved` or `Event::LocationFailed`.
    LocateDevice,
}
