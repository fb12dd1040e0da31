//! 核心模块 - 配置与本地账本节点

pub mod config;
pub mod node;

pub use config::Config;
pub use node::LedgerNode;
