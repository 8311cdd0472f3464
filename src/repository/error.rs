// ==========================================
// 井资产只读仓储 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 未找到不是错误, 由 Option / 空集合表达
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== 构造期错误 =====
    /// 构造期依赖缺失或配置非法 (只在构造时出现, 不在调用时出现)
    #[error("配置无效: {0}")]
    InvalidConfiguration(String),

    // ===== 数据库错误 =====
    /// 无法获取会话, 原样透传底层错误, 不重试
    #[error("数据库连接失败: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("数据库查询失败: {0}")]
    Query(String),
}

// 会话建立之后的语句失败统一归为查询错误
impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => StoreError::Query(msg),
            _ => StoreError::Query(err.to_string()),
        }
    }
}

impl StoreError {
    /// 是否为连接类错误
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_failure_maps_to_query() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("no such table: node_master".to_string()),
        );
        let mapped: StoreError = err.into();
        match mapped {
            StoreError::Query(msg) => assert!(msg.contains("node_master")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_connection_error_keeps_source() {
        let err = StoreError::Connection(rusqlite::Error::InvalidPath("/nope".into()));
        assert!(err.is_connection());
        assert!(std::error::Error::source(&err).is_some());
    }
}
