use super::id::IdError;
use crate::ledger::StubError;
use shared::ErrorCode;
use thiserror::Error;

/// Ledger operation errors
///
/// Every variant is terminal for the current transaction. Nothing is retried
/// here; the host aborts the transaction and prior state stays untouched.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] IdError),

    #[error("Corrupt record at {key}: {source}")]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    /// Host-level failure while serving `read`
    #[error("{{\"Error\":\"Failed to get state for {key}\"}}")]
    ReadFailed {
        key: String,
        #[source]
        source: StubError,
    },

    #[error("Received unknown function invocation: {0}")]
    UnknownOperation(String),

    #[error("Ledger storage error: {0}")]
    Storage(#[from] StubError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    pub fn corrupt(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::CorruptRecord {
            key: key.into(),
            source,
        }
    }

    /// 错误码（调用方据此区分错误类型）
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            LedgerError::InvalidTimestamp(_) => ErrorCode::InvalidTimestamp,
            LedgerError::CorruptRecord { .. } => ErrorCode::CorruptRecord,
            LedgerError::NotFound(_) | LedgerError::ReadFailed { .. } => ErrorCode::NotFound,
            LedgerError::UnknownOperation(_) => ErrorCode::UnknownOperation,
            LedgerError::Storage(_) => ErrorCode::StorageError,
            LedgerError::Serialization(_) => ErrorCode::InternalError,
        }
    }
}
