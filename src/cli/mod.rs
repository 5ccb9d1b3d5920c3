//! Command-line surface: argument parsing, logging setup and the non-interactive commands.

pub mod commands;

pub use commands::{Cli, Commands, run};

use tracing_subscriber::EnvFilter;

/// Initialize stderr logging. `RUST_LOG` overrides `default_directive`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
