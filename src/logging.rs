use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "operation_name");
/// // Or with additional fields:
/// trace_time!(start, "operation_name", settled = stats.settled);
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Environment variable consulted after `RUST_LOG`
pub const LOG_ENV: &str = "MODELPATH_LOG";

/// Install a global `tracing` subscriber for an application that embeds
/// modelpath and has no subscriber of its own.
///
/// The library itself only emits: a `debug` span around each search with
/// its completion counters, and `trace` timings. Applications that already
/// install a subscriber should skip this and filter on the `modelpath`
/// target instead.
///
/// `log_level` may be a bare level (`trace`) or a full directive
/// (`modelpath=trace,other=info`); it wins over `verbose`. `RUST_LOG`, then
/// [`LOG_ENV`], override both. Output goes to stderr, as JSON lines with
/// span open/close events when `log_json` is set. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, log_level)));

    let json = log_json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
    });
    let compact = (!log_json).then(|| {
        fmt::layer()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(compact)
        .try_init()?;
    Ok(())
}

/// Filter used when neither environment variable is set
fn default_directive(verbose: bool, log_level: Option<&str>) -> String {
    match log_level {
        Some(level) if level.contains('=') => level.to_string(),
        Some(level) => format!("modelpath={}", level),
        None if verbose => "modelpath=debug".to_string(),
        None => "modelpath=warn".to_string(),
    }
}
