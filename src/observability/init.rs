//! Tracing subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name reported on every exported batch.
pub const SERVICE_NAME: &str = "GF Radar";

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "gfradar-otlp.json";

/// Level used when neither `RUST_LOG` nor `trace_level` is set.
const DEFAULT_LEVEL: &str = "info";

/// Chooses the filter directive: `RUST_LOG`, then `trace_level`, then `info`.
fn resolve_filter(env_directive: Option<String>, config: &Config) -> String {
    env_directive
        .filter(|d| !d.trim().is_empty())
        .or_else(|| config.trace_level.clone())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Installs the global subscriber exporting spans to
/// `<data_dir>/gfradar-otlp.json`.
///
/// Only the first call in a process takes effect. If the data directory
/// cannot be created tracing stays off; the plugin works without it.
pub fn init_tracing(config: &Config) {
    let directive = resolve_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), config);

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(exporter::SCOPE_NAME));

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::registry().with(filter).with(otel_layer).try_init();
}
