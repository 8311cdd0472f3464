// ==========================================
// 井资产只读仓储 - 仓储配置
// ==========================================
// 来源: 环境变量 / JSON 文本 / 代码默认值
// 校验: 只在构造期进行, 失败返回 InvalidConfiguration
// ==========================================

use crate::repository::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 默认慢 SQL 阈值（毫秒）, 0 表示关闭慢 SQL 日志
pub const DEFAULT_SLOW_SQL_MS: u64 = 200;

/// 环境变量名
pub mod env_keys {
    pub const DB_PATH: &str = "WELL_STORE_DB_PATH";
    pub const BUSY_TIMEOUT_MS: &str = "WELL_STORE_BUSY_TIMEOUT_MS";
    pub const SLOW_SQL_MS: &str = "WELL_STORE_SLOW_SQL_MS";
    pub const WAL_JOURNAL: &str = "WELL_STORE_WAL_JOURNAL";
}

/// 仓储配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite 数据库文件路径
    pub db_path: String,

    /// 每个连接的 busy_timeout（毫秒）
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// 慢 SQL 阈值（毫秒）
    #[serde(default = "default_slow_sql_ms")]
    pub slow_sql_ms: u64,

    /// 首次获取会话时把库切到 WAL 日志模式, 报表读取不再被写事务阻塞
    #[serde(default = "default_true")]
    pub wal_journal: bool,
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

fn default_slow_sql_ms() -> u64 {
    DEFAULT_SLOW_SQL_MS
}

fn default_true() -> bool {
    true
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

impl StoreConfig {
    /// 以默认参数创建配置
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            slow_sql_ms: DEFAULT_SLOW_SQL_MS,
            wal_journal: true,
        }
    }

    /// 从环境变量加载配置
    ///
    /// # 环境变量
    /// - `WELL_STORE_DB_PATH`: 数据库路径（必填）
    /// - `WELL_STORE_BUSY_TIMEOUT_MS`: busy_timeout（默认 5000）
    /// - `WELL_STORE_SLOW_SQL_MS`: 慢 SQL 阈值（默认 200）
    /// - `WELL_STORE_WAL_JOURNAL`: WAL 日志模式开关（默认开启）
    pub fn from_env() -> StoreResult<Self> {
        let db_path = std::env::var(env_keys::DB_PATH).map_err(|_| {
            StoreError::InvalidConfiguration(format!("缺少环境变量 {}", env_keys::DB_PATH))
        })?;

        let mut config = Self::new(db_path);

        if let Some(ms) = read_env_u64(env_keys::BUSY_TIMEOUT_MS)? {
            config.busy_timeout_ms = ms;
        }
        if let Some(ms) = read_env_u64(env_keys::SLOW_SQL_MS)? {
            config.slow_sql_ms = ms;
        }
        if let Ok(v) = std::env::var(env_keys::WAL_JOURNAL) {
            config.wal_journal = is_true(&v);
        }

        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文本加载配置
    pub fn from_json_str(raw: &str) -> StoreResult<Self> {
        let config: StoreConfig = serde_json::from_str(raw)
            .map_err(|e| StoreError::InvalidConfiguration(format!("配置 JSON 解析失败: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> StoreResult<()> {
        if self.db_path.trim().is_empty() {
            return Err(StoreError::InvalidConfiguration(
                "db_path 不能为空".to_string(),
            ));
        }
        Ok(())
    }
}

fn read_env_u64(key: &str) -> StoreResult<Option<u64>> {
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<u64>().map(Some).map_err(|_| {
            StoreError::InvalidConfiguration(format!("{} 不是合法的整数: {}", key, v))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = StoreConfig::new("/tmp/wells.db");
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert_eq!(config.slow_sql_ms, DEFAULT_SLOW_SQL_MS);
        assert!(config.wal_journal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = StoreConfig::from_json_str(r#"{"db_path": "wells.db", "slow_sql_ms": 0}"#)
            .unwrap();
        assert_eq!(config.db_path, "wells.db");
        assert_eq!(config.slow_sql_ms, 0);
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert!(config.wal_journal);
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let err = StoreConfig::from_json_str(r#"{"db_path": "  "}"#).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_malformed_json_is_invalid() {
        let err = StoreConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_is_true() {
        assert!(is_true(" Yes "));
        assert!(is_true("1"));
        assert!(!is_true("off"));
    }
}
