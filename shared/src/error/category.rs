//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 4xxx: Order / conference errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Order / conference errors (4xxx)
    Order,
    /// System errors (9xxx and unassigned ranges)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Order,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Order => "order",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(4106), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::ScanCodeMismatch.category(), ErrorCategory::Order);
        assert_eq!(ErrorCode::NetworkError.category(), ErrorCategory::System);
        assert_eq!(ErrorCode::NotAuthenticated.category(), ErrorCategory::Auth);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Order).unwrap();
        assert_eq!(json, "\"order\"");
    }
}
