//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → gfradar-otlp.json
//! ```
//!
//! Spans are written as OTLP JSON lines to
//! `~/.local/share/zellij/gfradar/gfradar-otlp.json`, rotated at 10 MB with
//! three backups. The filter comes from `RUST_LOG`, then the `trace_level`
//! config key, then `info`.
//!
//! - [`init`]: subscriber setup
//! - [`exporter`]: span exporter and tracer provider
//! - [`otlp`]: OTLP JSON encoding
//! - [`rotating`]: size-rotated line writer

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
