//! Local ledger host
//!
//! Runs one chaincode invocation per redb write transaction:
//!
//! ```text
//! (function, args) → Operation::parse → begin txn → execute
//!                                                    ├─ Ok, invoke → commit
//!                                                    ├─ Ok, query  → abort
//!                                                    └─ Err        → abort
//! ```
//!
//! A failed invocation leaves no partial writes: the goods record write and
//! the index rewrite of an issue commit together or not at all.

use super::config::Config;
use crate::chaincode::{GoodsChaincode, Operation, Payload};
use crate::goods::error::LedgerResult;
use crate::ledger::{LedgerStorage, StubResult};
use tracing::{debug, error, warn};

pub struct LedgerNode {
    storage: LedgerStorage,
    chaincode: GoodsChaincode,
}

impl LedgerNode {
    /// Open (or create) the on-disk world state under `config.work_dir`
    pub fn open(config: &Config) -> StubResult<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let storage = LedgerStorage::open(config.db_path())?;
        tracing::info!(path = %config.db_path().display(), "World state opened");
        Ok(Self::with_storage(storage, config))
    }

    /// In-memory world state, lost on drop
    pub fn in_memory(config: &Config) -> StubResult<Self> {
        Ok(Self::with_storage(LedgerStorage::open_in_memory()?, config))
    }

    pub fn with_storage(storage: LedgerStorage, config: &Config) -> Self {
        Self {
            storage,
            chaincode: GoodsChaincode::new(config.maturity_offset_days),
        }
    }

    pub fn storage(&self) -> &LedgerStorage {
        &self.storage
    }

    /// Execute one invocation stamped with the current time
    pub fn execute<A: AsRef<str>>(&self, function: &str, args: &[A]) -> LedgerResult<Payload> {
        self.execute_at(function, args, shared::util::now_millis())
    }

    /// Execute one invocation with a given transaction timestamp
    pub fn execute_at<A: AsRef<str>>(
        &self,
        function: &str,
        args: &[A],
        timestamp_ms: i64,
    ) -> LedgerResult<Payload> {
        let op = Operation::parse(function, args)?;
        let is_query = op.is_query();
        let name = op.name();

        let tx_id = uuid::Uuid::new_v4().to_string();
        let mut tx = self.storage.begin(tx_id.as_str(), timestamp_ms)?;
        debug!(
            tx_id = %tx_id,
            op = name,
            timestamp = %shared::util::format_millis(timestamp_ms),
            "Transaction started"
        );

        match self.chaincode.execute(&mut tx, op) {
            Ok(payload) => {
                if is_query {
                    tx.abort()?;
                } else {
                    tx.commit()?;
                    debug!(tx_id = %tx_id, op = name, "Transaction committed");
                }
                Ok(payload)
            }
            Err(e) => {
                error!(tx_id = %tx_id, op = name, code = %e.code(), error = %e, "Transaction aborted");
                if let Err(abort_err) = tx.abort() {
                    warn!(tx_id = %tx_id, error = %abort_err, "Abort failed");
                }
                Err(e)
            }
        }
    }
}
