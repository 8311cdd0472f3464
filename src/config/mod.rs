// ==========================================
// 井资产只读仓储 - 配置层
// ==========================================
// 职责: 数据库路径、超时、报表隔离级别等运行参数
// ==========================================

pub mod store_config;

pub use store_config::{env_keys, StoreConfig, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_SLOW_SQL_MS};
