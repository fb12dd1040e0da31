//! Unified error codes for the goods ledger
//!
//! Every failure a ledger operation can report maps onto one [`ErrorCode`].
//! Callers of the host runtime only ever see the numeric code and a message,
//! so the table is kept stable and shared across crates.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General
//! - 1xxx: Request errors (arguments, dispatch, timestamps)
//! - 2xxx: Record errors (missing or undecodable ledger entries)
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ErrorCategory, ErrorCode};
//!
//! let code = ErrorCode::CorruptRecord;
//! assert_eq!(code.code(), 2001);
//! assert_eq!(code.category(), ErrorCategory::Record);
//! ```

mod category;
mod codes;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
