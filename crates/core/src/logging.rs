//! Process-wide tracing setup shared by the game and the command-line tools.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,delve_core::mapgen=warn";

static TRACING_INIT: Once = Once::new();

/// Installs a compact `fmt` subscriber. `RUST_LOG` overrides `default_filter`.
/// Only the first call has any effect.
pub fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        let subscriber =
            tracing_subscriber::fmt().with_env_filter(filter).with_target(true).compact();
        // A host may already own the global subscriber.
        let _ = subscriber.try_init();
    });
}
