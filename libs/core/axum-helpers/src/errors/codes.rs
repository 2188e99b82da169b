//! Numeric and symbolic codes attached to every error log line.
//!
//! Clients only ever see the message body; the code is for whoever reads the
//! logs.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// One or more validation chains failed
    ValidationError,
    /// Body could not be parsed as JSON
    InvalidJson,
    NotFound,
    /// Request origin not in the allow-list
    Forbidden,
    /// Body over the extractor's size limit
    PayloadTooLarge,

    // Server errors
    InternalError,

    // Database errors (2000-2999)
    /// Query rejected by the database
    DatabaseError,
    /// Server unreachable or connection dropped
    DatabaseConnection,
    /// No pooled connection became free in time
    DatabasePoolTimeout,
    /// Row expected by an update was not there
    DatabaseRecordNotFound,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseConnection => "DATABASE_CONNECTION",
            Self::DatabasePoolTimeout => "DATABASE_POOL_TIMEOUT",
            Self::DatabaseRecordNotFound => "DATABASE_RECORD_NOT_FOUND",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Forbidden => 1007,
            Self::InvalidJson => 1010,
            Self::PayloadTooLarge => 1013,

            Self::DatabaseError => 2003,
            Self::DatabaseConnection => 2004,
            Self::DatabasePoolTimeout => 2013,
            Self::DatabaseRecordNotFound => 2017,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
