//! In-memory ledger stub

use super::{LedgerStub, StubError, StubResult};
use std::collections::{BTreeMap, BTreeSet};

/// `BTreeMap`-backed [`LedgerStub`] with a fixed transaction timestamp
///
/// Writes apply immediately; there is no rollback. Individual keys can be
/// made to fail to simulate host-level errors.
#[derive(Debug, Clone, Default)]
pub struct MemoryStub {
    state: BTreeMap<String, Vec<u8>>,
    tx_id: String,
    timestamp_ms: i64,
    failing_reads: BTreeSet<String>,
    failing_writes: BTreeSet<String>,
}

impl MemoryStub {
    pub fn new(timestamp_ms: i64) -> Self {
        Self {
            tx_id: "mem-tx".to_string(),
            timestamp_ms,
            ..Default::default()
        }
    }

    /// Move the clock, e.g. to start the next simulated transaction
    pub fn set_timestamp(&mut self, timestamp_ms: i64) {
        self.timestamp_ms = timestamp_ms;
    }

    /// Make `get_state(key)` fail
    pub fn fail_reads_of(&mut self, key: impl Into<String>) {
        self.failing_reads.insert(key.into());
    }

    /// Make `put_state(key, _)` fail
    pub fn fail_writes_of(&mut self, key: impl Into<String>) {
        self.failing_writes.insert(key.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

impl LedgerStub for MemoryStub {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    fn tx_timestamp_millis(&self) -> i64 {
        self.timestamp_ms
    }

    fn get_state(&self, key: &str) -> StubResult<Option<Vec<u8>>> {
        if self.failing_reads.contains(key) {
            return Err(StubError::Unavailable(format!("read of {} rejected", key)));
        }
        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> StubResult<()> {
        if self.failing_writes.contains(key) {
            return Err(StubError::Unavailable(format!("write of {} rejected", key)));
        }
        self.state.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
