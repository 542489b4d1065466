//! Tracing initialization and subscriber setup.

use super::{tracer, SCOPE, TRACE_FILE};
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Installs the global subscriber: an `EnvFilter` from `trace_level` feeding
/// an OpenTelemetry layer that exports to `<data dir>/eventscout-otlp.json`.
///
/// Only the first call has any effect. If the data directory cannot be
/// created tracing stays disabled; the plugin works the same without it.
///
/// # Example
///
/// ```rust,no_run
/// use eventscout::observability::init_tracing;
/// use eventscout::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(config.trace_level.as_deref().unwrap_or("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let layer = OpenTelemetryLayer::new(provider.tracer(SCOPE));

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
