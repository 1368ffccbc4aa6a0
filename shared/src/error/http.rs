//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::OrderNotFound | Self::OrderItemNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            Self::VersionConflict => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied => StatusCode::FORBIDDEN,

            // 422 Unprocessable (business rule rejected)
            Self::InvalidQuantity
            | Self::QuantityExceedsRequired
            | Self::ScanCodeMismatch
            | Self::ConferenceIncomplete
            | Self::OrderEmpty => StatusCode::UNPROCESSABLE_ENTITY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::ConfigError | Self::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::OrderItemNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(ErrorCode::VersionConflict.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_business_rule_status() {
        assert_eq!(
            ErrorCode::QuantityExceedsRequired.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::ConferenceIncomplete.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_default_bad_request() {
        assert_eq!(ErrorCode::ValidationFailed.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::InvalidFormat.http_status(), StatusCode::BAD_REQUEST);
    }
}
