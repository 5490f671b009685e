//! Log output setup for the binary.
//!
//! Library crates log through `log`; the subscriber installed here also
//! receives those records.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given settings.
///
/// `--verbose` wins, then `RUST_LOG`, then the config file level.
pub fn filter(verbose: bool, configured: &str) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
}

/// Installs the global subscriber, writing to stderr.
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbose: bool, configured: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose, configured))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
