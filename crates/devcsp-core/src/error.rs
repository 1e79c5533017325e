//! Shared error type across devcsp crates.

use thiserror::Error;

/// Stable error codes (config tooling and tests match on these).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration failed to parse or validate.
    InvalidConfig,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Serialized policy cannot be carried in an HTTP header.
    InvalidHeader,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::InvalidHeader => "INVALID_HEADER",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CspError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum CspError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("invalid header value: {0}")]
    InvalidHeader(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl CspError {
    /// Map error to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            CspError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            CspError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            CspError::InvalidHeader(_) => ErrorCode::InvalidHeader,
            CspError::Internal(_) => ErrorCode::Internal,
        }
    }
}
