//! Tracing subscriber initialization with structured logging.
//!
//! # Usage
//!
//! ```no_run
//! use skilltree_observe::tracing_setup::{LogFormat, init_tracing};
//!
//! // Human-readable output for local development
//! init_tracing(LogFormat::Pretty).unwrap();
//! ```
//!
//! Services shipping logs to an aggregator should use [`LogFormat::Json`].

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Fallback directive when `RUST_LOG` is unset or invalid.
const DEFAULT_DIRECTIVE: &str = "info";

/// Output format for the `fmt` layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Build the subscriber without installing it.
///
/// Both formats include the event target and span close timing, so the
/// `calculate_node_scores` span reports how long a rollup took. Filtering
/// honours `RUST_LOG`, falling back to `info`.
pub fn build_subscriber(format: LogFormat) -> Box<dyn Subscriber + Send + Sync> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    match format {
        LogFormat::Pretty => Box::new(tracing_subscriber::registry().with(env_filter).with(fmt_layer)),
        LogFormat::Json => Box::new(
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.json()),
        ),
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    build_subscriber(format).try_init()?;
    Ok(())
}
