/// Invalid server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that does not parse.
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// A CORS origin that is not a valid header value.
    #[error("Invalid CORS origin {0:?}")]
    InvalidCorsOrigin(String),

    /// `HOST` is not an IP address.
    #[error("Invalid HOST address {0:?}")]
    InvalidHost(String),
}

/// Failures that stop the server binary.
///
/// Handler failures never end up here; they are rendered to the client as
/// envelope errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

/// Convenience type alias for startup results.
pub type AppResult<T> = Result<T, AppError>;
