//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the filter, storage and
//! worker layers:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Worker / Geolocation replies ┘
//! ```
//!
//! - [`actions`]: side effects returned by the handler
//! - [`handler`]: the interaction controller
//! - [`modes`]: input and view modes
//! - [`state`]: application state and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ViewMode};
pub use state::{AppState, LoadState};
