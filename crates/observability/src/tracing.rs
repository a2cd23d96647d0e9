//! Tracing/logging initialization for processes embedding the ledger core.

use tracing_subscriber::EnvFilter;

/// Log output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON lines, for services shipping logs to a collector.
    Json,
    /// Human-readable lines, for local runs and tests.
    Plain,
}

/// Initialize tracing for the process with JSON output.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with(LogFormat::Json);
}

/// Initialize tracing with an explicit output format.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Transfer outcomes
/// are logged at `info`/`warn` by the engine's logging decorator, so the
/// default already captures the money movements.
pub fn init_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Plain => builder.try_init(),
    };
}
