//! Tracing subscriber setup.
//!
//! Logs always go to stderr: stdout carries the chooser table, preview cards
//! and the final reference.
//!
//! Filter priority: `RPICK_LOG`, then `RUST_LOG`, then `--verbose` (debug),
//! then `warn`.
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "RPICK_LOG";

pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = [LOG_ENV, "RUST_LOG"]
        .iter()
        .find_map(|var| {
            let value = std::env::var(var).ok()?;
            EnvFilter::try_new(value).ok()
        })
        .unwrap_or_else(|| EnvFilter::new(default_directive));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
