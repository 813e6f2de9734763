//! Worker thread implementation for venue fetches.
//!
//! The worker owns the [`VenueSource`] and runs every fetch off the plugin's
//! render loop. Message handling itself ([`VenueWorker::handle_message`]) is
//! plain Rust and testable natively; only the Zellij `ZellijWorker` glue is
//! gated behind the `plugin` feature.

use crate::domain::error::{GfRadarError, Result};
use crate::storage::{BuiltinVenues, JsonVenueFile, SimulatedLatency, VenueSource};
use crate::worker::messages::{DatasetSpec, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Worker name used for routing messages between plugin and worker.
pub const WORKER_NAME: &str = "gfradar";

/// Worker thread state.
///
/// The venue source is built lazily from the first message's
/// [`DatasetSpec`] and rebuilt whenever a message names a different one.
#[derive(Serialize, Deserialize, Default)]
pub struct VenueWorker {
    #[serde(skip)]
    source: Option<(DatasetSpec, Box<dyn VenueSource>)>,
}

impl VenueWorker {
    /// Builds the venue source described by `spec`.
    #[must_use]
    pub fn build_source(spec: &DatasetSpec) -> Box<dyn VenueSource> {
        let delay = Duration::from_millis(spec.delay_ms);
        match &spec.path {
            Some(path) => Box::new(SimulatedLatency::new(JsonVenueFile::new(path.clone()), delay)),
            None => Box::new(SimulatedLatency::new(BuiltinVenues::new(), delay)),
        }
    }

    /// Returns the source for `spec`, building it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the source slot is still empty after initialization.
    fn source_for(&mut self, spec: &DatasetSpec) -> Result<&mut Box<dyn VenueSource>> {
        let stale = self.source.as_ref().map_or(true, |(current, _)| current != spec);
        if stale {
            let source = Self::build_source(spec);
            tracing::debug!(source = %source.describe(), "venue source initialized");
            self.source = Some((spec.clone(), source));
        }

        self.source
            .as_mut()
            .map(|(_, source)| source)
            .ok_or_else(|| GfRadarError::Worker("venue source not initialized".to_string()))
    }

    /// Helper for turning fetch results into responses with consistent logging.
    fn handle_fetch_result<T, F>(operation: &str, request_id: u64, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation, request_id, "worker operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation, request_id, error = %e, "worker operation failed");
                WorkerResponse::Error {
                    request_id,
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_venues(&mut self, request_id: u64, spec: &DatasetSpec) -> WorkerResponse {
        let result = self.source_for(spec).and_then(|source| source.fetch_venues());
        Self::handle_fetch_result("load venues", request_id, result, |venues| {
            tracing::debug!(venue_count = venues.len(), "venues loaded");
            WorkerResponse::VenuesLoaded { request_id, venues }
        })
    }

    /// Attaches the sender's trace context to the current thread.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to post back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", request_id = message.request_id());
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadVenues { request_id, source, .. } => {
                self.handle_load_venues(request_id, &source)
            }
        }
    }
}

#[cfg(feature = "plugin")]
mod zellij_glue {
    use super::{VenueWorker, WORKER_NAME};
    use crate::worker::messages::{WorkerMessage, WorkerResponse};
    use std::sync::atomic::{AtomicBool, Ordering};
    use zellij_tile::prelude::{PluginMessage, ZellijWorker};
    use zellij_tile::shim::post_message_to_plugin;

    /// Tracks whether worker tracing has been initialized.
    static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

    fn post_response(response: &WorkerResponse) {
        match serde_json::to_string(response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: WORKER_NAME.to_string(),
                payload,
                worker_name: None,
            }),
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
        }
    }

    impl ZellijWorker<'_> for VenueWorker {
        fn on_message(&mut self, message: String, payload: String) {
            if !WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
                crate::observability::init_tracing(&crate::Config::default());
            }

            if message != WORKER_NAME {
                tracing::debug!(message_name = %message, "ignoring message for another worker");
                return;
            }

            let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to deserialize worker message");
                    return;
                }
            };

            let response = self.handle_message(worker_message);
            post_response(&response);
        }
    }
}
