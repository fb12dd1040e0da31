//! Goods records
//!
//! - **id**: deterministic id generation from issuer and maturity date
//! - **keys**: world-state key layout
//! - **store**: goods record read/write over a [`LedgerStub`](crate::ledger::LedgerStub)
//! - **index**: the singleton order index
//!
//! # Data Flow (issue)
//!
//! ```text
//! GoodsInput → id (tx timestamp + offset) → get goods:<id>
//!                                             ├─ present → no-op
//!                                             └─ absent  → put goods:<id> → index RMW
//! ```

pub mod error;
pub mod id;
pub mod index;
pub mod keys;
pub mod store;

pub use error::{LedgerError, LedgerResult};
pub use id::{IdError, generate_id, generate_id_from_str};
pub use index::OrderIndex;
pub use store::{GoodsStore, IssueOutcome};
