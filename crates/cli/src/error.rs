//! CLI error types

use lbctl_domain::{LbError, LbErrorCategory};
use thiserror::Error;

/// Errors reported to the user
#[derive(Debug, Error)]
pub enum CliError {
    /// A command needing a session ran without one. No call was made.
    #[error("no user is logged in")]
    NotLoggedIn,

    /// A remote operation failed
    #[error("{operation} failed: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: LbError,
    },

    /// Pool fields were rejected before any call
    #[error("invalid pool details: {0}")]
    InvalidPool(#[source] LbError),

    /// The line did not match the shell grammar; holds clap's message
    #[error("{0}")]
    Usage(String),

    /// Configuration could not be loaded; the message already says so
    #[error("{0}")]
    Config(#[source] LbError),

    #[error("format error: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for a failed one-shot command
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::NotLoggedIn => 3,
            Self::Operation { source, .. } => match source.category() {
                LbErrorCategory::Authentication => 3,
                LbErrorCategory::Network => 4,
                _ => 1,
            },
            _ => 1,
        }
    }
}

/// Wrap an API error with the name of the command that hit it
pub fn failed(operation: &'static str) -> impl FnOnce(LbError) -> CliError {
    move |source| CliError::Operation { operation, source }
}
