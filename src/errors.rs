//! TeleSign client error types.

use thiserror::Error;

/// Errors that can occur while signing or issuing a TeleSign request.
#[derive(Debug, Error)]
pub enum TelesignError {
    /// Credential or client configuration is invalid.
    ///
    /// Retrying without fixing the configuration reproduces the error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The caller passed an invalid argument (method, resource path, code length).
    #[error("Invalid input: {0}")]
    InputError(String),

    /// The service rejected the signed request (HTTP 401).
    #[error("Authorization rejected by TeleSign (HTTP {status})")]
    AuthorizationError {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The service answered with a non-success status.
    #[error("TeleSign service error (HTTP {status})")]
    ServiceError {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// HTTP transport error communicating with TeleSign.
    #[error("TeleSign transport error: {0}")]
    Transport(String),

    /// Failed to parse a TeleSign response.
    #[error("Protocol error: {0}")]
    ProtocolError(String),
}

impl TelesignError {
    /// True for errors caused by local misconfiguration or bad arguments.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError(_) | Self::InputError(_))
    }

    /// True when the remote service answered and refused the request.
    pub fn is_service_rejection(&self) -> bool {
        matches!(self, Self::AuthorizationError { .. } | Self::ServiceError { .. })
    }

    /// Raw response body for service rejections.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::AuthorizationError { body, .. } | Self::ServiceError { body, .. } => Some(body),
            _ => None,
        }
    }
}
