// ==========================================
// 井资产只读仓储 - 会话提供者
// ==========================================
// 职责: 按次创建短生命周期数据库会话, 绑定到指定隔离级别
// 约束: 每次 acquire 打开独立连接, 提供者本身不持有共享连接
// 约束: 会话在所有退出路径上都会释放 (Drop)
// 约束: 首次获取前把库切到 WAL, 报表读取不被写事务阻塞
// ==========================================

use crate::config::StoreConfig;
use crate::db::{ensure_wal_journal, open_sqlite_connection};
use crate::repository::error::{StoreError, StoreResult};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

// ==========================================
// SessionVariant - 会话类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionVariant {
    /// 标准隔离级别, 用于可能影响后续写入决策的读取
    Standard,
    /// 报表读取: query_only, WAL 快照读, 不等待写锁
    Reporting,
}

impl SessionVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionVariant::Standard => "standard",
            SessionVariant::Reporting => "reporting",
        }
    }
}

impl fmt::Display for SessionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// Session - 单次操作的数据库会话
// ==========================================
/// 单次逻辑操作持有的数据库会话
///
/// 连接随 Session 一起释放; `release` 只是让释放点在代码里显式可见。
pub struct Session {
    conn: Connection,
    variant: SessionVariant,
    acquired_at: Instant,
}

impl Session {
    pub fn new(conn: Connection, variant: SessionVariant) -> Self {
        tracing::trace!(target: "session", variant = variant.as_str(), "session acquired");
        Self {
            conn,
            variant,
            acquired_at: Instant::now(),
        }
    }

    pub fn variant(&self) -> SessionVariant {
        self.variant
    }

    /// 只读查询能力
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// 显式释放会话
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        tracing::trace!(
            target: "session",
            variant = self.variant.as_str(),
            held_ms = self.acquired_at.elapsed().as_millis() as u64,
            "session released"
        );
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

// ==========================================
// SessionProvider - 会话工厂
// ==========================================
/// 会话工厂
///
/// 实现必须可被多个调用方并发使用。获取失败返回 `StoreError::Connection`, 不重试。
pub trait SessionProvider: Send + Sync {
    fn acquire(&self, variant: SessionVariant) -> StoreResult<Session>;
}

/// 基于 SQLite 文件的会话工厂
///
/// 克隆共享同一份 WAL 检查状态。
#[derive(Debug, Clone)]
pub struct SqliteSessionProvider {
    config: StoreConfig,
    wal_checked: Arc<AtomicBool>,
    wal_lock: Arc<Mutex<()>>,
}

impl SqliteSessionProvider {
    /// 创建新的会话工厂（配置非法时返回 InvalidConfiguration）
    ///
    /// 构造期不碰数据库; 库不可达在 acquire 时以 Connection 错误返回
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            wal_checked: Arc::new(AtomicBool::new(false)),
            wal_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn connection_error(&self, variant: SessionVariant, e: rusqlite::Error) -> StoreError {
        tracing::warn!(
            target: "session",
            variant = variant.as_str(),
            db_path = %self.config.db_path,
            error = %e,
            "会话获取失败"
        );
        StoreError::Connection(e)
    }

    // 切换日志模式需要独占锁, 串行化只做一次
    fn prepare_journal(&self) -> StoreResult<()> {
        if !self.config.wal_journal || self.wal_checked.load(Ordering::Acquire) {
            return Ok(());
        }

        let _guard = self.wal_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if self.wal_checked.load(Ordering::Acquire) {
            return Ok(());
        }

        let variant = SessionVariant::Standard;
        let conn = open_sqlite_connection(variant, &self.config)
            .map_err(|e| self.connection_error(variant, e))?;
        let mode = ensure_wal_journal(&conn).map_err(|e| self.connection_error(variant, e))?;
        tracing::debug!(target: "session", journal_mode = %mode, "journal mode checked");

        self.wal_checked.store(true, Ordering::Release);
        Ok(())
    }
}

impl SessionProvider for SqliteSessionProvider {
    fn acquire(&self, variant: SessionVariant) -> StoreResult<Session> {
        self.prepare_journal()?;
        let conn = open_sqlite_connection(variant, &self.config)
            .map_err(|e| self.connection_error(variant, e))?;
        Ok(Session::new(conn, variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;

    fn pragma_i64(session: &Session, pragma: &str) -> i64 {
        session
            .conn()
            .query_row(&format!("PRAGMA {}", pragma), [], |row| row.get(0))
            .unwrap()
    }

    fn journal_mode(session: &Session) -> String {
        session
            .conn()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_reporting_session_reads_wal_snapshot() {
        let db = TestDb::new();
        let provider = SqliteSessionProvider::new(db.config()).unwrap();

        let session = provider.acquire(SessionVariant::Reporting).unwrap();
        assert_eq!(session.variant(), SessionVariant::Reporting);
        assert_eq!(journal_mode(&session), "wal");
        assert_eq!(pragma_i64(&session, "query_only"), 1);
    }

    #[test]
    fn test_standard_session_keeps_default_isolation() {
        let db = TestDb::new();
        let provider = SqliteSessionProvider::new(db.config()).unwrap();

        let session = provider.acquire(SessionVariant::Standard).unwrap();
        assert_eq!(journal_mode(&session), "wal");
        assert_eq!(pragma_i64(&session, "query_only"), 0);
        assert_eq!(pragma_i64(&session, "foreign_keys"), 1);
    }

    #[test]
    fn test_wal_switch_can_be_disabled() {
        let db = TestDb::new();
        let mut config = db.config();
        config.wal_journal = false;
        let provider = SqliteSessionProvider::new(config).unwrap();

        let session = provider.acquire(SessionVariant::Reporting).unwrap();
        assert_eq!(journal_mode(&session), "delete");
        assert_eq!(pragma_i64(&session, "query_only"), 1);
    }

    #[test]
    fn test_reporting_read_sees_committed_value_during_exclusive_write() {
        let db = TestDb::new();
        db.seed("INSERT INTO system_parameters (parameter, value) VALUES ('ScanRate', '60');");
        let mut config = db.config();
        config.busy_timeout_ms = 100;
        let provider = SqliteSessionProvider::new(config).unwrap();

        let writer = provider.acquire(SessionVariant::Standard).unwrap();
        writer
            .conn()
            .execute_batch(
                "BEGIN EXCLUSIVE; UPDATE system_parameters SET value = '30' WHERE parameter = 'ScanRate';",
            )
            .unwrap();

        let reader = provider.acquire(SessionVariant::Reporting).unwrap();
        let value: String = reader
            .conn()
            .query_row(
                "SELECT value FROM system_parameters WHERE parameter = 'ScanRate'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(value, "60");

        writer.conn().execute_batch("ROLLBACK;").unwrap();
    }

    #[test]
    fn test_reporting_session_rejects_writes() {
        let db = TestDb::new();
        let provider = SqliteSessionProvider::new(db.config()).unwrap();

        let session = provider.acquire(SessionVariant::Reporting).unwrap();
        let result = session
            .conn()
            .execute("INSERT INTO transactions (transaction_id) VALUES (1)", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_database_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let provider =
            SqliteSessionProvider::new(StoreConfig::new(path.to_string_lossy())).unwrap();

        for variant in [SessionVariant::Standard, SessionVariant::Reporting] {
            let err = provider.acquire(variant).unwrap_err();
            assert!(err.is_connection(), "variant={} err={:?}", variant, err);
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_path_is_rejected_at_construction() {
        let err = SqliteSessionProvider::new(StoreConfig::new("")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfiguration(_)));
    }
}
