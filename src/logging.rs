//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by the client.
///
/// Use the RUST_LOG environment variable to override the defaults, which
/// only show warnings such as failed lookups.
///
/// E.g. To enable debug level logging:
///   RUST_LOG=DEBUG
///
/// Or to see every chunk read from the server:
///   RUST_LOG=dictsyn::codec=TRACE
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}
