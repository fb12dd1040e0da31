//! World-state key layout
//!
//! | Key | Value |
//! |-----|-------|
//! | `goods:<id>` | JSON `Goods` |
//! | `_orderindex` | JSON array of goods keys |
//! | `abc` | test value written by `init` |
//!
//! Neither fixed key starts with [`GOODS_PREFIX`], so no derived goods key
//! can ever land on them.

/// Prefix of every goods record key
pub const GOODS_PREFIX: &str = "goods:";

/// Singleton order index
pub const ORDER_INDEX_KEY: &str = "_orderindex";

/// Scratch key seeded by `init` to check the ledger is writable
pub const TEST_KEY: &str = "abc";

/// Record key for a goods id
pub fn goods_key(id: &str) -> String {
    format!("{}{}", GOODS_PREFIX, id)
}

/// Goods id from a record key, `None` when the key is not a goods key
pub fn goods_id_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(GOODS_PREFIX).filter(|id| !id.is_empty())
}
