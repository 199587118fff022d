pub mod build_info;
pub mod clock;

pub use clock::SystemClock;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "tally=info";

/// Initializes the global tracing subscriber, logging to stderr.
///
/// `RUST_LOG` is honoured; `tally=info` is always added on top of it.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }

        let installed = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        if let Err(err) = installed {
            // Another subscriber owns the global slot; it receives this event.
            tracing::debug!(%err, "keeping the existing tracing subscriber");
        }
    });
}
