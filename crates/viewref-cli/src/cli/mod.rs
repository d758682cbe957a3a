mod args;
mod commands;
mod dispatch;


use tracing_subscriber::EnvFilter;

pub use commands::build_cli;
pub use dispatch::{ConvertParams, DepsParams, SqlParams};

/// Install the stderr log subscriber.
///
/// An explicit `-v` wins over `RUST_LOG`; without either only warnings show.
pub fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
