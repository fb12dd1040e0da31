//! Error category classification

use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Request errors
/// - 2xxx: Record errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Request errors (1xxx)
    Request,
    /// Record errors (2xxx)
    Record,
    /// System errors (everything else)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Request,
            2000..3000 => Self::Record,
            _ => Self::System,
        }
    }

    /// Whether the caller can fix the error by changing its input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Request | Self::Record)
    }
}
