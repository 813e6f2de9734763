//! Background worker for venue fetches.
//!
//! Venue loading runs on a Zellij worker thread so a slow or large dataset
//! never blocks the plugin's render loop. Requests and replies are JSON over
//! Zellij's plugin messaging and carry trace context across the boundary.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::{VenueWorker, WORKER_NAME};
pub use messages::{DatasetSpec, TraceContext, WorkerMessage, WorkerResponse};
