//! Error types for nsddns
//!
//! Every fallible operation in the workspace returns [`Result`]. Nothing is
//! recovered locally: errors travel up to the binary, which maps them to an
//! exit code.

use thiserror::Error;

/// Result type alias for nsddns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for nsddns
#[derive(Error, Debug)]
pub enum Error {
    /// Missing, unreadable or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration JSON errors
    #[error("Configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP-level failure talking to the IP service or the registrar
    #[error("Transport error: {0}")]
    Transport(String),

    /// Registrar replied with a non-success status code
    #[error("Registrar API error: {detail}")]
    Api {
        /// The registrar's own diagnostic text, unmodified
        detail: String,
    },

    /// Malformed payload (XML envelope, IP text)
    #[error("Parse error: {0}")]
    Parse(String),

    /// No A record matches the configured host
    #[error("No A record for host '{host}' in domain '{domain}'")]
    NotFound {
        /// Fully-qualified host that was searched for
        host: String,
        /// Domain whose records were listed
        domain: String,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a registrar API error
    pub fn api(detail: impl Into<String>) -> Self {
        Self::Api {
            detail: detail.into(),
        }
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(host: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::NotFound {
            host: host.into(),
            domain: domain.into(),
        }
    }

    /// Whether this error stems from loading or validating configuration
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Json(_))
    }
}
