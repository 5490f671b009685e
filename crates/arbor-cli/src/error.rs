//! Error types for arbor-cli

use thiserror::Error;

/// Result type alias for arbor-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in arbor-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from arbor-core (store, resolver, fixture or config)
    #[error(transparent)]
    Core(#[from] arbor_core::Error),

    /// No fixture on the command line or in the config file
    #[error("no fixture given: pass --fixture or set store.fixture in the config file")]
    MissingFixture,

    /// Arguments that clap accepted but the command cannot use
    #[error("invalid arguments: {0}")]
    Usage(String),

    /// JSON rendering failed
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Core(e) if e.is_not_found() => 3,
            Error::MissingFixture | Error::Usage(_) => 2,
            _ => 1,
        }
    }
}
