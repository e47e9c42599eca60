//! Error types used throughout the application

use thiserror::Error;

/// Main error type for lbctl
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LbError {
    /// No usable session, or login arguments were empty
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Network or connection level failure, no HTTP status was received
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The remote service answered with a status outside 2xx
    #[error("Remote error {code}: {message}")]
    Remote { code: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// A request body could not be serialized
    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Could not determine id of new pool on load balancer {lb_id}")]
    PoolIdNotFound { lb_id: String },

    #[error("Pool {pool_id} not found on load balancer {lb_id}")]
    PoolNotFound { lb_id: String, pool_id: String },

    /// The create call succeeded but the response carried no load-balancer link
    #[error("Load balancer {name} in {datacenter} was requested but no id was returned")]
    AmbiguousCreation { datacenter: String, name: String },

    #[error("Invalid pool argument: {0}")]
    InvalidPoolArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Categories of errors, used by the CLI to pick exit codes and wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LbErrorCategory {
    /// No session or rejected credentials (401, 403)
    Authentication,
    /// Any other non-2xx status
    Remote,
    /// Connection failures
    Network,
    /// Response or request bodies that could not be (de)serialized
    Serialization,
    /// Bad user input, caught before any call
    Input,
    /// Missing identifiers in otherwise successful responses
    Resolution,
    /// Configuration errors
    Config,
}

impl LbError {
    /// Build a remote error from a status code
    pub fn remote(code: u16, message: impl Into<String>) -> Self {
        Self::Remote { code, message: message.into() }
    }

    /// HTTP status carried by a remote error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Remote { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether this is a remote 404
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Get the error category for this error
    pub fn category(&self) -> LbErrorCategory {
        match self {
            Self::MissingCredentials(_) => LbErrorCategory::Authentication,
            Self::Remote { code: 401 | 403, .. } => LbErrorCategory::Authentication,
            Self::Remote { .. } => LbErrorCategory::Remote,
            Self::Transport(_) => LbErrorCategory::Network,
            Self::Decode(_) | Self::Encode(_) => LbErrorCategory::Serialization,
            Self::InvalidPoolArgument(_) => LbErrorCategory::Input,
            Self::PoolIdNotFound { .. }
            | Self::PoolNotFound { .. }
            | Self::AmbiguousCreation { .. } => LbErrorCategory::Resolution,
            Self::Config(_) => LbErrorCategory::Config,
        }
    }
}

/// Result type alias for lbctl operations
pub type Result<T> = std::result::Result<T, LbError>;
