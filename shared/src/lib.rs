//! Shared types for the goods ledger
//!
//! Domain records, the unified error code table and small time helpers
//! used by every crate in the workspace.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ErrorCategory, ErrorCode, InvalidErrorCode};
pub use models::{Goods, GoodsInput, Owner};
pub use serde::{Deserialize, Serialize};
