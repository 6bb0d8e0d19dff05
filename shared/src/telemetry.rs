use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber, writing to stderr so it never
/// interleaves with the rendered screens on stdout.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between `debug` and
/// `warn` for the workspace crates.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,application={lvl},infrastructure={lvl},presentation={lvl},mesa_qr={lvl}",
            lvl = default_level
        ))
    });

    // A second call (tests, embedded use) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub struct Telemetry {
    start: Instant,
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Whole milliseconds, saturating at `u64::MAX`.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
