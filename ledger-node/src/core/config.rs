use crate::goods::id::DEFAULT_MATURITY_OFFSET_DAYS;
use std::path::PathBuf;

/// 节点配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./ledger-data | 工作目录 (数据库、日志) |
/// | LEDGER_DB_FILE | world_state.redb | 数据库文件名 |
/// | MATURITY_OFFSET_DAYS | 15 | 到期日偏移天数 (ID 后缀) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 设置后同时写入滚动日志文件 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/ledger MATURITY_OFFSET_DAYS=30 goods-ledger issue '{...}'
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// 数据库文件名 (相对 work_dir)
    pub db_file: String,
    /// Days between issue date and maturity date
    pub maturity_offset_days: i64,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 运行环境: development | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./ledger-data".into()),
            db_file: std::env::var("LEDGER_DB_FILE")
                .unwrap_or_else(|_| "world_state.redb".into()),
            maturity_offset_days: std::env::var("MATURITY_OFFSET_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MATURITY_OFFSET_DAYS),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, maturity_offset_days: i64) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.maturity_offset_days = maturity_offset_days;
        config
    }

    /// Full path of the world-state database
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
