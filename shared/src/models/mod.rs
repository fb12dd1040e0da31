//! Data models
//!
//! Records stored in the ledger world state.

pub mod goods;

pub use goods::{Goods, GoodsInput, Owner};
