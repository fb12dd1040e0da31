//! Order index
//!
//! A single world-state entry under [`ORDER_INDEX_KEY`] holding a JSON array
//! of goods record keys (`goods:<id>`, always the prefixed form).
//!
//! # Invariants
//!
//! - no duplicate entries
//! - every entry names a stored goods record
//!
//! # Contention
//!
//! Every issue rewrites the whole entry, so all issuances serialize on this
//! one key at the host's conflict detection. Membership is a linear scan and
//! each registration rewrites the full list.
//!
//! The read-modify-write in [`OrderIndex::register_key`] is only safe because
//! the host runs it inside one serialized transaction. On a host that lets
//! another transaction write the index between this read and this write the
//! index loses updates.

use super::error::{LedgerError, LedgerResult};
use super::keys::ORDER_INDEX_KEY;
use crate::ledger::LedgerStub;

/// Decode the stored index. Absent, empty and `null` all mean "no entries".
pub fn read_index<S: LedgerStub + ?Sized>(stub: &S) -> LedgerResult<Vec<String>> {
    let Some(bytes) = stub.get_state(ORDER_INDEX_KEY)? else {
        return Ok(Vec::new());
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let entries: Option<Vec<String>> = serde_json::from_slice(&bytes)
        .map_err(|e| LedgerError::corrupt(ORDER_INDEX_KEY, e))?;
    Ok(entries.unwrap_or_default())
}

/// Ordered set of goods keys over the ledger stub
pub struct OrderIndex<'a, S: LedgerStub> {
    stub: &'a mut S,
}

impl<'a, S: LedgerStub> OrderIndex<'a, S> {
    pub fn new(stub: &'a mut S) -> Self {
        Self { stub }
    }

    /// Append `key` unless already present.
    ///
    /// Returns `true` when the index was rewritten. The list is written back
    /// in a single `put_state`, never partially.
    pub fn register_key(&mut self, key: &str) -> LedgerResult<bool> {
        let mut entries = read_index(&*self.stub)?;

        let mut found = false;
        for entry in &entries {
            if entry == key {
                found = true;
                break;
            }
        }
        if found {
            tracing::debug!(key = %key, "Key already indexed");
            return Ok(false);
        }

        entries.push(key.to_string());
        self.write(&entries)?;
        tracing::debug!(key = %key, len = entries.len(), "Key appended to order index");
        Ok(true)
    }

    /// Replace the index with an empty list
    pub fn reset(&mut self) -> LedgerResult<()> {
        self.write(&[])
    }

    pub fn entries(&self) -> LedgerResult<Vec<String>> {
        read_index(&*self.stub)
    }

    pub fn contains(&self, key: &str) -> LedgerResult<bool> {
        Ok(self.entries()?.iter().any(|e| e == key))
    }

    fn write(&mut self, entries: &[String]) -> LedgerResult<()> {
        let bytes = serde_json::to_vec(entries)?;
        self.stub.put_state(ORDER_INDEX_KEY, &bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryStub;

    #[test]
    fn test_absent_index_is_empty() {
        let mut stub = MemoryStub::new(0);
        let index = OrderIndex::new(&mut stub);
        assert!(index.entries().unwrap().is_empty());
    }

    #[test]
    fn test_empty_and_null_bytes_are_empty() {
        let mut stub = MemoryStub::new(0);
        stub.put_state(ORDER_INDEX_KEY, b"").unwrap();
        assert!(read_index(&stub).unwrap().is_empty());

        stub.put_state(ORDER_INDEX_KEY, b"null").unwrap();
        assert!(read_index(&stub).unwrap().is_empty());
    }

    #[test]
    fn test_register_appends_in_order() {
        let mut stub = MemoryStub::new(0);
        let mut index = OrderIndex::new(&mut stub);

        assert!(index.register_key("goods:aAB").unwrap());
        assert!(index.register_key("goods:bAB").unwrap());
        assert_eq!(index.entries().unwrap(), vec!["goods:aAB", "goods:bAB"]);
        assert!(index.contains("goods:bAB").unwrap());
        assert!(!index.contains("goods:cAB").unwrap());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut stub = MemoryStub::new(0);
        let mut index = OrderIndex::new(&mut stub);

        index.register_key("goods:acmeCL").unwrap();
        let before = index.entries().unwrap();

        assert!(!index.register_key("goods:acmeCL").unwrap());
        assert_eq!(index.entries().unwrap(), before);
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn test_reset_writes_empty_list() {
        let mut stub = MemoryStub::new(0);
        {
            let mut index = OrderIndex::new(&mut stub);
            index.register_key("goods:x").unwrap();
            index.reset().unwrap();
        }
        assert_eq!(stub.get_state(ORDER_INDEX_KEY).unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_corrupt_index() {
        let mut stub = MemoryStub::new(0);
        stub.put_state(ORDER_INDEX_KEY, b"{not json").unwrap();

        let mut index = OrderIndex::new(&mut stub);
        let err = index.register_key("goods:x").unwrap_err();
        assert!(matches!(err, LedgerError::CorruptRecord { .. }));
        // the bad bytes are left as they were
        assert_eq!(stub.get_state(ORDER_INDEX_KEY).unwrap(), Some(b"{not json".to_vec()));
    }

    #[test]
    fn test_failed_write_leaves_index_unchanged() {
        let mut stub = MemoryStub::new(0);
        OrderIndex::new(&mut stub).register_key("goods:a").unwrap();
        stub.fail_writes_of(ORDER_INDEX_KEY);

        let err = OrderIndex::new(&mut stub).register_key("goods:b").unwrap_err();
        assert!(matches!(err, LedgerError::Storage(_)));
        assert_eq!(read_index(&stub).unwrap(), vec!["goods:a"]);
    }
}
