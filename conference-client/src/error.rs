//! Client error types

use conference::GatewayError;
use shared::error::ErrorCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Http(_) => ErrorCode::NetworkError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }
}

impl From<ClientError> for GatewayError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => GatewayError::Network(e.to_string()),
            ClientError::Unauthorized => GatewayError::Unauthorized,
            ClientError::Forbidden(msg) => GatewayError::Forbidden(msg),
            ClientError::NotFound(msg) => GatewayError::NotFound(msg),
            ClientError::Validation(msg) => GatewayError::Validation(msg),
            other => GatewayError::Internal(other.to_string()),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_mapping() {
        assert_eq!(GatewayError::from(ClientError::Unauthorized), GatewayError::Unauthorized);
        assert_eq!(
            GatewayError::from(ClientError::Validation("Quantidade".into())),
            GatewayError::Validation("Quantidade".into())
        );
        assert!(matches!(
            GatewayError::from(ClientError::InvalidResponse("html".into())),
            GatewayError::Internal(_)
        ));
        assert_eq!(ClientError::Forbidden("x".into()).code(), ErrorCode::PermissionDenied);
    }
}
