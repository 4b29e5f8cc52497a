//! Shared error type across the in-app crates.

use thiserror::Error;

/// Stable error codes (compared by callers and tests instead of messages).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input / malformed payload or config.
    Malformed,
    /// Content resolution attempted without a live resolver.
    MissingResolver,
    /// A serialization step failed.
    Encode,
    /// Filesystem failure.
    Io,
    /// Unsupported config or snapshot version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Malformed => "MALFORMED",
            ErrorCode::MissingResolver => "MISSING_RESOLVER",
            ErrorCode::Encode => "ENCODE",
            ErrorCode::Io => "IO",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, InAppError>;

/// Unified error type used by core and store.
#[derive(Debug, Error)]
pub enum InAppError {
    #[error("malformed: {0}")]
    Malformed(String),
    #[error("no content resolver bound to message {0}")]
    MissingResolver(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("io: {0}")]
    Io(String),
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl InAppError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            InAppError::Malformed(_) => ErrorCode::Malformed,
            InAppError::MissingResolver(_) => ErrorCode::MissingResolver,
            InAppError::Encode(_) => ErrorCode::Encode,
            InAppError::Io(_) => ErrorCode::Io,
            InAppError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            InAppError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl From<serde_json::Error> for InAppError {
    fn from(e: serde_json::Error) -> Self {
        InAppError::Encode(e.to_string())
    }
}
