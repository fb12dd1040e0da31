//! Goods record store
//!
//! One goods record per world-state key (`goods:<id>`), JSON encoded.
//! Mutations are full read-modify-write cycles of a single key; `issue` is
//! the only path that also touches the order index.

use super::error::{LedgerError, LedgerResult};
use super::id::generate_id;
use super::index::{OrderIndex, read_index};
use super::keys::goods_key;
use crate::ledger::LedgerStub;
use shared::models::{Goods, GoodsInput, Owner};
use tracing::{debug, info, warn};

/// Result of an issue call
#[derive(Debug, Clone, PartialEq)]
pub enum IssueOutcome {
    /// New record written and indexed
    Created(Goods),
    /// A record already exists under the derived id; nothing was written
    AlreadyExists(String),
}

impl IssueOutcome {
    pub fn id(&self) -> &str {
        match self {
            IssueOutcome::Created(goods) => &goods.id,
            IssueOutcome::AlreadyExists(id) => id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, IssueOutcome::Created(_))
    }
}

/// Goods records over a ledger stub
pub struct GoodsStore<'a, S: LedgerStub> {
    stub: &'a mut S,
    maturity_offset_days: i64,
}

impl<'a, S: LedgerStub> GoodsStore<'a, S> {
    pub fn new(stub: &'a mut S, maturity_offset_days: i64) -> Self {
        Self {
            stub,
            maturity_offset_days,
        }
    }

    // ========== Goods records ==========

    /// Issue a new goods record
    ///
    /// The id is derived from the issuer and the transaction timestamp. When
    /// a record already exists under that id the call succeeds without
    /// writing anything, so a replayed issue is harmless.
    pub fn issue(&mut self, input: GoodsInput) -> LedgerResult<IssueOutcome> {
        if input.issuer.is_empty() {
            return Err(LedgerError::invalid_argument("issuer must be a non-empty string"));
        }

        let id = generate_id(
            &input.issuer,
            self.stub.tx_timestamp_millis(),
            self.maturity_offset_days,
        )?;
        let key = goods_key(&id);

        if self.stub.get_state(&key)?.is_some() {
            warn!(id = %id, tx_id = %self.stub.tx_id(), "Goods id already exists, issue skipped");
            return Ok(IssueOutcome::AlreadyExists(id));
        }

        let goods = input.into_goods(id);
        self.write_record(&key, &goods)?;
        OrderIndex::new(&mut *self.stub).register_key(&key)?;

        info!(
            id = %goods.id,
            issuer = %goods.issuer,
            tx_id = %self.stub.tx_id(),
            "Goods issued"
        );
        Ok(IssueOutcome::Created(goods))
    }

    /// Get a goods record by id
    pub fn get(&self, id: &str) -> LedgerResult<Goods> {
        self.load(&goods_key(id))
    }

    /// Replace the whole owner list with a single owner
    ///
    /// This does not transfer between owners or merge quantities; whatever
    /// owners were there are dropped.
    pub fn set_owner(&mut self, id: &str, company: &str) -> LedgerResult<Goods> {
        let key = goods_key(id);
        let mut goods = self.load(&key)?;

        goods.owners = vec![Owner::new(company)];
        self.write_record(&key, &goods)?;

        info!(id = %id, owner = %company, "Goods owner set");
        Ok(goods)
    }

    /// Change the lifecycle state, leaving every other field as it was
    pub fn set_state(&mut self, id: &str, state: &str) -> LedgerResult<Goods> {
        let key = goods_key(id);
        let mut goods = self.load(&key)?;

        let previous = std::mem::replace(&mut goods.state, state.to_string());
        self.write_record(&key, &goods)?;

        info!(id = %id, from = %previous, to = %state, "Goods state changed");
        Ok(goods)
    }

    /// All indexed goods records, in index order
    pub fn list(&self) -> LedgerResult<Vec<Goods>> {
        let keys = read_index(&*self.stub)?;
        let mut records = Vec::with_capacity(keys.len());
        for key in &keys {
            records.push(self.load(key)?);
        }
        Ok(records)
    }

    // ========== Raw access ==========

    /// Unchecked write of any key
    pub fn put_raw(&mut self, key: &str, value: &[u8]) -> LedgerResult<()> {
        self.stub.put_state(key, value)?;
        debug!(key = %key, len = value.len(), "Raw state written");
        Ok(())
    }

    /// Unchecked read of any key
    pub fn get_raw(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        let value = self
            .stub
            .get_state(key)
            .map_err(|source| LedgerError::ReadFailed {
                key: key.to_string(),
                source,
            })?;
        debug!(key = %key, found = value.is_some(), "Raw state read");
        Ok(value)
    }

    // ========== Internals ==========

    fn load(&self, key: &str) -> LedgerResult<Goods> {
        let bytes = self
            .stub
            .get_state(key)?
            .ok_or_else(|| LedgerError::not_found(key))?;
        serde_json::from_slice(&bytes).map_err(|e| LedgerError::corrupt(key, e))
    }

    fn write_record(&mut self, key: &str, goods: &Goods) -> LedgerResult<()> {
        let bytes = serde_json::to_vec(goods)?;
        self.stub.put_state(key, &bytes)?;
        Ok(())
    }
}
