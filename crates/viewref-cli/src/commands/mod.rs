pub mod convert;
pub mod deps;
pub mod loader;
pub mod sql;

#[cfg(test)]
mod deps_tests;
#[cfg(test)]
mod test_fixtures;

use std::path::PathBuf;

use viewref_core::SchemaError;

/// Anything a command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(std::io::Error),

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    View(#[from] viewref::Error),

    #[error("no reference at index {index} (view has {len})")]
    NoSuchReference { index: usize, len: usize },
}

/// Print the error and exit with status 1.
pub fn exit_with(err: CliError) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(1);
}
