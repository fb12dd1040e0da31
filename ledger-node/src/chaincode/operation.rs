//! Ledger operations
//!
//! The host hands over a function name and a list of string arguments.
//! [`Operation::parse`] is the only place that looks at either; everything
//! after it matches on the enum.

use crate::goods::{LedgerError, LedgerResult};
use shared::models::GoodsInput;

/// Operation invoked by one ledger transaction
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Seed the test key and clear the order index
    Init { value: i64 },
    /// Unchecked write of any key
    Write { key: String, value: String },
    /// Unchecked read of any key
    Read { key: String },
    /// Issue a goods record
    Issue { input: GoodsInput },
    /// Replace the owners of `goods:<id>`
    SetOwner { key: String, company: String },
    /// Change the lifecycle state of `goods:<id>`
    ChangeState { key: String, state: String },
    /// Goods record by id
    GetGoods { id: String },
    /// Every indexed goods record
    ListGoods,
    /// The order index as stored
    ReadIndex,
}

impl Operation {
    /// Parse a host invocation
    ///
    /// | Function | Args |
    /// |----------|------|
    /// | `init` | integer |
    /// | `write` | key, value |
    /// | `read` | key |
    /// | `issue` / `add_goods` | goods JSON |
    /// | `setOwner` / `set_owner` | key, company |
    /// | `changeState` / `change_state` | key, state |
    /// | `getGoods` / `get_goods` | id |
    /// | `listGoods` / `list_goods` | - |
    /// | `readIndex` / `read_index` | - |
    pub fn parse<A: AsRef<str>>(function: &str, args: &[A]) -> LedgerResult<Self> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        let op = match function {
            "init" => {
                let [value] = expect_args::<1>(function, &args)?;
                let value = value.trim().parse::<i64>().map_err(|_| {
                    LedgerError::invalid_argument("Expecting integer value for asset holding")
                })?;
                Operation::Init { value }
            }
            "write" => {
                let [key, value] = expect_args::<2>(function, &args)?;
                Operation::Write {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "read" => {
                let [key] = expect_args::<1>(function, &args)?;
                Operation::Read {
                    key: key.to_string(),
                }
            }
            "issue" | "add_goods" => {
                let [json] = expect_args::<1>(function, &args)?;
                let input = serde_json::from_str::<GoodsInput>(json).map_err(|e| {
                    LedgerError::invalid_argument(format!("Invalid commercial goods issue: {}", e))
                })?;
                Operation::Issue { input }
            }
            "setOwner" | "set_owner" => {
                let [key, company] = expect_args::<2>(function, &args)?;
                Operation::SetOwner {
                    key: key.to_string(),
                    company: company.to_string(),
                }
            }
            "changeState" | "change_state" => {
                let [key, state] = expect_args::<2>(function, &args)?;
                Operation::ChangeState {
                    key: key.to_string(),
                    state: state.to_string(),
                }
            }
            "getGoods" | "get_goods" => {
                let [id] = expect_args::<1>(function, &args)?;
                Operation::GetGoods { id: id.to_string() }
            }
            "listGoods" | "list_goods" => {
                expect_args::<0>(function, &args)?;
                Operation::ListGoods
            }
            "readIndex" | "read_index" => {
                expect_args::<0>(function, &args)?;
                Operation::ReadIndex
            }
            other => return Err(LedgerError::UnknownOperation(other.to_string())),
        };

        Ok(op)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Init { .. } => "init",
            Operation::Write { .. } => "write",
            Operation::Read { .. } => "read",
            Operation::Issue { .. } => "issue",
            Operation::SetOwner { .. } => "setOwner",
            Operation::ChangeState { .. } => "changeState",
            Operation::GetGoods { .. } => "getGoods",
            Operation::ListGoods => "listGoods",
            Operation::ReadIndex => "readIndex",
        }
    }

    /// Queries read state only; the host never commits them
    pub fn is_query(&self) -> bool {
        match self {
            Operation::Read { .. }
            | Operation::GetGoods { .. }
            | Operation::ListGoods
            | Operation::ReadIndex => true,
            Operation::Init { .. }
            | Operation::Write { .. }
            | Operation::Issue { .. }
            | Operation::SetOwner { .. }
            | Operation::ChangeState { .. } => false,
        }
    }
}

fn expect_args<'a, const N: usize>(function: &str, args: &[&'a str]) -> LedgerResult<[&'a str; N]> {
    <[&'a str; N]>::try_from(args).map_err(|_| {
        LedgerError::invalid_argument(format!(
            "Incorrect number of arguments for {}. Expecting {}, got {}",
            function,
            N,
            args.len()
        ))
    })
}
