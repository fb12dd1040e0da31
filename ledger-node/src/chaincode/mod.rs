//! Goods chaincode
//!
//! Maps each [`Operation`] onto the goods store and the order index. One
//! call of [`GoodsChaincode::execute`] is one ledger transaction's worth of
//! work; committing or aborting is up to the caller.

mod operation;

pub use operation::Operation;

use crate::goods::error::{LedgerError, LedgerResult};
use crate::goods::id::DEFAULT_MATURITY_OFFSET_DAYS;
use crate::goods::index::{OrderIndex, read_index};
use crate::goods::keys::{TEST_KEY, goods_id_from_key};
use crate::goods::store::GoodsStore;
use crate::ledger::LedgerStub;
use tracing::{info, instrument};

/// Response payload, `None` for operations that only acknowledge
pub type Payload = Option<Vec<u8>>;

#[derive(Debug, Clone)]
pub struct GoodsChaincode {
    maturity_offset_days: i64,
}

impl Default for GoodsChaincode {
    fn default() -> Self {
        Self::new(DEFAULT_MATURITY_OFFSET_DAYS)
    }
}

impl GoodsChaincode {
    pub fn new(maturity_offset_days: i64) -> Self {
        Self {
            maturity_offset_days,
        }
    }

    pub fn maturity_offset_days(&self) -> i64 {
        self.maturity_offset_days
    }

    /// Parse and execute a host invocation
    pub fn invoke<S, A>(&self, stub: &mut S, function: &str, args: &[A]) -> LedgerResult<Payload>
    where
        S: LedgerStub,
        A: AsRef<str>,
    {
        let op = Operation::parse(function, args)?;
        self.execute(stub, op)
    }

    #[instrument(skip_all, fields(op = op.name(), tx_id = %stub.tx_id()))]
    pub fn execute<S: LedgerStub>(&self, stub: &mut S, op: Operation) -> LedgerResult<Payload> {
        match op {
            Operation::Init { value } => {
                stub.put_state(TEST_KEY, value.to_string().as_bytes())?;
                OrderIndex::new(stub).reset()?;
                info!(value, "Ledger initialized, order index cleared");
                Ok(None)
            }
            Operation::Write { key, value } => {
                self.store(stub).put_raw(&key, value.as_bytes())?;
                Ok(None)
            }
            Operation::Read { key } => self.store(stub).get_raw(&key),
            Operation::Issue { input } => {
                let outcome = self.store(stub).issue(input)?;
                Ok(Some(outcome.id().as_bytes().to_vec()))
            }
            Operation::SetOwner { key, company } => {
                let id = record_id(&key)?;
                let mut store = self.store(stub);
                store.set_owner(id, &company)?;
                store.get_raw(&key)
            }
            Operation::ChangeState { key, state } => {
                let id = record_id(&key)?;
                self.store(stub).set_state(id, &state)?;
                Ok(None)
            }
            Operation::GetGoods { id } => {
                let goods = self.store(stub).get(&id)?;
                Ok(Some(serde_json::to_vec(&goods)?))
            }
            Operation::ListGoods => {
                let records = self.store(stub).list()?;
                Ok(Some(serde_json::to_vec(&records)?))
            }
            Operation::ReadIndex => {
                let entries = read_index(&*stub)?;
                Ok(Some(serde_json::to_vec(&entries)?))
            }
        }
    }

    fn store<'a, S: LedgerStub>(&self, stub: &'a mut S) -> GoodsStore<'a, S> {
        GoodsStore::new(stub, self.maturity_offset_days)
    }
}

fn record_id(key: &str) -> LedgerResult<&str> {
    goods_id_from_key(key).ok_or_else(|| {
        LedgerError::invalid_argument(format!("{} is not a goods key (expected goods:<id>)", key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goods::keys::ORDER_INDEX_KEY;
    use crate::ledger::MemoryStub;
    use shared::models::Goods;

    /// 2024-03-05T00:00:00Z
    const MARCH_5_2024: i64 = 1_709_596_800_000;
    const BOND: &str =
        r#"{"name":"Bond","price":100.5,"postage":7.5,"issuer":"acme","state":"new"}"#;

    fn read_goods(stub: &MemoryStub, key: &str) -> Goods {
        serde_json::from_slice(&stub.get_state(key).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_init_seeds_and_clears_index() {
        let cc = GoodsChaincode::default();
        let mut stub = MemoryStub::new(MARCH_5_2024);
        stub.put_state(ORDER_INDEX_KEY, br#"["goods:old"]"#).unwrap();

        assert_eq!(cc.invoke(&mut stub, "init", &["1"]).unwrap(), None);
        assert_eq!(stub.get_state(TEST_KEY).unwrap(), Some(b"1".to_vec()));
        assert_eq!(stub.get_state(ORDER_INDEX_KEY).unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_issue_returns_id() {
        let cc = GoodsChaincode::new(15);
        let mut stub = MemoryStub::new(MARCH_5_2024);

        let payload = cc.invoke(&mut stub, "issue", &[BOND]).unwrap();
        assert_eq!(payload, Some(b"acmeCL".to_vec()));

        let stored = read_goods(&stub, "goods:acmeCL");
        assert_eq!(stored.owners.len(), 1);
        assert_eq!(stored.owners[0].company, "acme");
    }

    #[test]
    fn test_write_read_raw() {
        let cc = GoodsChaincode::default();
        let mut stub = MemoryStub::new(0);

        cc.invoke(&mut stub, "write", &["color", "blue"]).unwrap();
        assert_eq!(
            cc.invoke(&mut stub, "read", &["color"]).unwrap(),
            Some(b"blue".to_vec())
        );
        assert_eq!(cc.invoke(&mut stub, "read", &["missing"]).unwrap(), None);
    }

    #[test]
    fn test_read_host_failure_payload() {
        let cc = GoodsChaincode::default();
        let mut stub = MemoryStub::new(0);
        stub.fail_reads_of("color");

        let err = cc.invoke(&mut stub, "read", &["color"]).unwrap_err();
        assert_eq!(err.to_string(), r#"{"Error":"Failed to get state for color"}"#);
    }

    #[test]
    fn test_set_owner_returns_updated_record() {
        let cc = GoodsChaincode::new(15);
        let mut stub = MemoryStub::new(MARCH_5_2024);
        cc.invoke(&mut stub, "issue", &[BOND]).unwrap();

        let payload = cc
            .invoke(&mut stub, "setOwner", &["goods:acmeCL", "globex"])
            .unwrap()
            .unwrap();
        let returned: Goods = serde_json::from_slice(&payload).unwrap();
        assert_eq!(returned.owners.len(), 1);
        assert_eq!(returned.owners[0].company, "globex");
        assert_eq!(payload, stub.get_state("goods:acmeCL").unwrap().unwrap());
    }

    #[test]
    fn test_change_state() {
        let cc = GoodsChaincode::new(15);
        let mut stub = MemoryStub::new(MARCH_5_2024);
        cc.invoke(&mut stub, "issue", &[BOND]).unwrap();
        let before = read_goods(&stub, "goods:acmeCL");

        let payload = cc
            .invoke(&mut stub, "changeState", &["goods:acmeCL", "settled"])
            .unwrap();
        assert_eq!(payload, None);

        let after = read_goods(&stub, "goods:acmeCL");
        assert_eq!(after.state, "settled");
        assert_eq!(after.owners, before.owners);
        assert_eq!(after.price, before.price);
        assert_eq!(after.name, before.name);
    }

    #[test]
    fn test_mutation_requires_goods_key() {
        let cc = GoodsChaincode::new(15);
        let mut stub = MemoryStub::new(MARCH_5_2024);

        let err = cc
            .invoke(&mut stub, "changeState", &["acmeCL", "settled"])
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)));

        let err = cc
            .invoke(&mut stub, "changeState", &["goods:acmeCL", "settled"])
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[test]
    fn test_queries() {
        let cc = GoodsChaincode::new(15);
        let mut stub = MemoryStub::new(MARCH_5_2024);
        cc.invoke(&mut stub, "init", &["0"]).unwrap();
        cc.invoke(&mut stub, "issue", &[BOND]).unwrap();

        let one = cc.invoke(&mut stub, "getGoods", &["acmeCL"]).unwrap().unwrap();
        let one: Goods = serde_json::from_slice(&one).unwrap();
        assert_eq!(one.id, "acmeCL");

        let all = cc.invoke::<_, &str>(&mut stub, "listGoods", &[]).unwrap().unwrap();
        let all: Vec<Goods> = serde_json::from_slice(&all).unwrap();
        assert_eq!(all, vec![one]);

        let index = cc.invoke::<_, &str>(&mut stub, "readIndex", &[]).unwrap();
        assert_eq!(index, Some(br#"["goods:acmeCL"]"#.to_vec()));
    }

    #[test]
    fn test_unknown_operation() {
        let cc = GoodsChaincode::default();
        let mut stub = MemoryStub::new(0);
        let err = cc.invoke(&mut stub, "delete", &["goods:x"]).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownOperation(_)));
        assert!(stub.is_empty());
    }
}
