//! Host ledger seam
//!
//! The goods module never talks to a database directly. It sees the world
//! state through [`LedgerStub`], the same narrow surface a chaincode shim
//! offers: point reads, point writes, and the identity and timestamp of the
//! transaction it runs in.
//!
//! | Implementation | Backing | Used by |
//! |----------------|---------|---------|
//! | [`RedbTxStub`] | redb `WriteTransaction` | [`LedgerNode`](crate::LedgerNode) |
//! | [`MemoryStub`] | `BTreeMap` | unit tests, replays |
//!
//! # Guarantees expected from a host
//!
//! - single-key atomic read and write
//! - read-your-writes inside one transaction
//! - no other transaction's write lands between this transaction's read and
//!   write of the same key
//! - commit or abort of the whole transaction
//!
//! There is no multi-key atomicity at the stub level; that comes only from
//! the host committing or aborting the surrounding transaction.

mod memory;
mod storage;

pub use memory::MemoryStub;
pub use storage::{LedgerStorage, RedbTxStub};

use thiserror::Error;

/// Host ledger errors
#[derive(Debug, Error)]
pub enum StubError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

pub type StubResult<T> = Result<T, StubError>;

/// World-state access for one transaction
pub trait LedgerStub {
    /// Transaction ID assigned by the host
    fn tx_id(&self) -> &str;

    /// 交易时间戳 (Unix millis, UTC)，同一交易在所有节点上一致
    fn tx_timestamp_millis(&self) -> i64;

    /// Read a key. `Ok(None)` when the key was never written.
    fn get_state(&self, key: &str) -> StubResult<Option<Vec<u8>>>;

    /// Write a key, replacing any previous value
    fn put_state(&mut self, key: &str, value: &[u8]) -> StubResult<()>;
}
