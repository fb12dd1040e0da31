//! Error code table
//!
//! Codes are organized by category:
//! - 0xxx: General
//! - 1xxx: Request errors
//! - 2xxx: Record errors
//! - 9xxx: System errors

use super::category::ErrorCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as `u16` on the wire so that callers in any language can
/// match on the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,

    // ==================== 1xxx: Request ====================
    /// Wrong argument count or shape
    InvalidArgument = 1001,
    /// ID generation input could not be used as a timestamp
    InvalidTimestamp = 1002,
    /// No operation with the requested name
    UnknownOperation = 1003,

    // ==================== 2xxx: Record ====================
    /// Stored bytes failed to decode into the expected schema
    CorruptRecord = 2001,
    /// Key absent on a read expected to find it
    NotFound = 2002,

    // ==================== 9xxx: System ====================
    /// Host storage failure
    StorageError = 9001,
    /// Internal error (e.g. serialization)
    InternalError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",

            ErrorCode::InvalidArgument => "Invalid argument",
            ErrorCode::InvalidTimestamp => "Invalid timestamp",
            ErrorCode::UnknownOperation => "Received unknown function invocation",

            ErrorCode::CorruptRecord => "Stored record is corrupt",
            ErrorCode::NotFound => "Record not found",

            ErrorCode::StorageError => "Ledger storage error",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),

            1001 => Ok(ErrorCode::InvalidArgument),
            1002 => Ok(ErrorCode::InvalidTimestamp),
            1003 => Ok(ErrorCode::UnknownOperation),

            2001 => Ok(ErrorCode::CorruptRecord),
            2002 => Ok(ErrorCode::NotFound),

            9001 => Ok(ErrorCode::StorageError),
            9002 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
