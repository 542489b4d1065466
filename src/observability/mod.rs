//! OpenTelemetry-based observability with file-based trace export.
//!
//! The plugin logs through `tracing` everywhere. When tracing is initialized,
//! spans are exported in OTLP JSON format to a rotating file for offline
//! analysis, since the plugin sandbox has no network path to a collector.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON Lines
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: `~/.local/share/zellij/eventscout/eventscout-otlp.json`
//! - **Automatic Rotation**: Past 10 MB, with 3 numbered backups
//! - **OTLP Format**: One `resourceSpans` document per line
//!
//! # Configuration
//!
//! The `trace_level` plugin option is an `EnvFilter` directive (`info` by
//! default), e.g. `debug` or `eventscout::app=trace,info`.
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Rotating file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::FileWriter;
pub use init::init_tracing;

/// Service name and instrumentation scope for exported spans.
const SCOPE: &str = "eventscout";

/// Trace file name inside the data directory.
const TRACE_FILE: &str = "eventscout-otlp.json";
