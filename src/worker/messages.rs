//! Worker thread message types.
//!
//! The plugin thread and the background worker exchange JSON-encoded
//! [`WorkerMessage`] requests and [`WorkerResponse`] replies. Every request
//! carries a `request_id`; the reply echoes it so the controller can drop
//! replies to requests it has already superseded.

use crate::domain::Venue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Distributed tracing context for cross-thread span propagation.
///
/// Holds the OpenTelemetry trace and span ids of the span that sent a
/// message, so worker spans join the same trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a 32-digit hex string.
    pub trace_id: String,

    /// Sender span ID as a 16-digit hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span is
    /// not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Where the worker should load venues from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// JSON dataset file; the embedded dataset when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Artificial delay before each fetch, in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,
}

/// Messages sent from the plugin thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch the full venue dataset.
    LoadVenues {
        /// Identifier echoed in the response.
        request_id: u64,

        /// Dataset to fetch from.
        source: DatasetSpec,

        /// Trace context for linking spans across threads.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Builds a `LoadVenues` message carrying the current trace context.
    #[must_use]
    pub fn load_venues(request_id: u64, source: DatasetSpec) -> Self {
        Self::LoadVenues {
            request_id,
            source,
            trace_context: TraceContext::from_current(),
        }
    }

    /// The request id this message will be answered with.
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::LoadVenues { request_id, .. } => *request_id,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadVenues { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The dataset was fetched.
    VenuesLoaded {
        request_id: u64,

        /// Venues in dataset order.
        venues: Vec<Venue>,
    },

    /// The fetch failed.
    Error {
        request_id: u64,

        /// Human-readable error message.
        message: String,
    },
}

impl WorkerResponse {
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::VenuesLoaded { request_id, .. } | Self::Error { request_id, .. } => *request_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_round_trips_through_json() {
        let message = WorkerMessage::LoadVenues {
            request_id: 3,
            source: DatasetSpec {
                path: Some(PathBuf::from("/tmp/venues.json")),
                delay_ms: 500,
            },
            trace_context: None,
        };
        let payload = serde_json::to_string(&message).unwrap();
        assert!(!payload.contains("trace_context"));

        let back: WorkerMessage = serde_json::from_str(&payload).unwrap();
        assert_eq!(back, message);
        assert_eq!(back.request_id(), 3);
    }

    #[test]
    fn test_without_subscriber_no_trace_context() {
        let message = WorkerMessage::load_venues(1, DatasetSpec::default());
        assert!(message.trace_context().is_none());
    }

    #[test]
    fn test_response_request_id() {
        let response = WorkerResponse::Error {
            request_id: 9,
            message: "boom".to_string(),
        };
        assert_eq!(response.request_id(), 9);
    }
}
