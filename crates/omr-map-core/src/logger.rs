//! Opt-in tracing setup (feature `tracing`).

use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a tracing fmt subscriber filtered by `RUST_LOG` (default
/// `info`). Calling this more than once is a no-op after the first
/// successful initialization.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).finish().try_init();
}
