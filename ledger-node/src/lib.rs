//! Goods Ledger - 商品发行与流转账本
//!
//! # 模块结构
//!
//! - [`goods`] - 商品记录、ID 生成与发行顺序索引
//! - [`chaincode`] - 操作解析与分发
//! - [`ledger`] - 世界状态接口 (redb / 内存)
//! - [`core`] - 配置与本地节点
//! - [`utils`] - 日志

pub mod chaincode;
pub mod core;
pub mod goods;
pub mod ledger;
pub mod utils;

pub use chaincode::{GoodsChaincode, Operation, Payload};
pub use crate::core::{Config, LedgerNode};
pub use goods::{LedgerError, LedgerResult};
pub use utils::logger::{init_logger, init_logger_with_file};
