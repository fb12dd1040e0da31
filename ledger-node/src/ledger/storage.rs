//! redb-based world state for the local ledger host
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `world_state` | `&str` | `&[u8]` | Every ledger key, goods records and index included |
//!
//! # Transactions
//!
//! Each ledger transaction is one redb `WriteTransaction`. redb admits a
//! single writer at a time, so the index read-modify-write can never
//! interleave with another transaction's. Dropping or aborting the
//! transaction discards all of its writes.

use super::{LedgerStub, StubResult};
use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
    WriteTransaction,
};
use std::path::Path;
use std::sync::Arc;

/// World state table: key = ledger key, value = raw bytes
const WORLD_STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("world_state");

/// Ledger world state backed by redb
#[derive(Clone)]
pub struct LedgerStorage {
    db: Arc<Database>,
}

impl LedgerStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StubResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> StubResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StubResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(WORLD_STATE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a ledger transaction
    pub fn begin(&self, tx_id: impl Into<String>, timestamp_ms: i64) -> StubResult<RedbTxStub> {
        Ok(RedbTxStub {
            txn: self.db.begin_write()?,
            tx_id: tx_id.into(),
            timestamp_ms,
        })
    }

    /// Read committed state outside any transaction
    pub fn get_state(&self, key: &str) -> StubResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WORLD_STATE_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    /// Number of committed keys
    pub fn len(&self) -> StubResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WORLD_STATE_TABLE)?;
        Ok(table.len()?)
    }

    pub fn is_empty(&self) -> StubResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// [`LedgerStub`] over an open redb write transaction
pub struct RedbTxStub {
    txn: WriteTransaction,
    tx_id: String,
    timestamp_ms: i64,
}

impl RedbTxStub {
    /// Make every write of this transaction durable
    pub fn commit(self) -> StubResult<()> {
        self.txn.commit()?;
        Ok(())
    }

    /// Discard every write of this transaction
    pub fn abort(self) -> StubResult<()> {
        self.txn.abort()?;
        Ok(())
    }
}

impl LedgerStub for RedbTxStub {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn tx_timestamp_millis(&self) -> i64 {
        self.timestamp_ms
    }

    fn get_state(&self, key: &str) -> StubResult<Option<Vec<u8>>> {
        let table = self.txn.open_table(WORLD_STATE_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> StubResult<()> {
        let mut table = self.txn.open_table(WORLD_STATE_TABLE)?;
        table.insert(key, value)?;
        Ok(())
    }
}
