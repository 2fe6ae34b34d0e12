/*!
 * Structured Tracing
 * Subscriber setup for the tomography debugger
 *
 * Every universe is a separate process writing to the same stderr; events
 * that matter for navigation carry a `pid` field.
 */

use crate::core::limits::{DEFAULT_LOG_FILTER, ENV_TRACE_JSON};
use tracing::debug;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing on stderr
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: warn)
/// - TOMOGRAPHY_TRACE_JSON: Enable JSON output (default: false)
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let use_json = json_requested(std::env::var(ENV_TRACE_JSON).ok().as_deref());

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        // JSON output for post-mortem parsing of a whole multiverse
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        // Compact output that stays out of the way of the prompt
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time()
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!(pid = std::process::id(), json = use_json, "tracing initialized");
    }
}

fn json_requested(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some("1" | "true" | "TRUE" | "yes"))
}
