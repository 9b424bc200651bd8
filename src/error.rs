// Error types for the gateway, the decision engine and configuration
use thiserror::Error;

/// Failures talking to the game API.
///
/// Credential expiry is retried once inside the client; only a second
/// expiry surfaces as [`GatewayError::AuthExpired`].
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{operation} failed with status {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("{operation} returned GraphQL errors: {message}")]
    GraphQl {
        operation: &'static str,
        message: String,
    },

    #[error("{0} returned no data")]
    MissingData(&'static str),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("credentials still rejected after refreshing the token")]
    AuthExpired,

    #[error("failed to read credentials from {path}: {source}")]
    Credentials {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a control-loop iteration.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
pub type EngineResult<T> = Result<T, EngineError>;
