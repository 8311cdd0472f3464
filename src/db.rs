// ==========================================
// 井资产只读仓储 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有连接的打开方式与 PRAGMA, 按会话类型区分读写能力
// - WAL 日志模式: 报表读取读已提交快照, 不等待写锁
// - 统一 busy_timeout, 减少并发读写时的偶发 busy 错误
// - 可选安装慢 SQL 日志
// ==========================================

use crate::config::StoreConfig;
use crate::session::SessionVariant;
use rusqlite::{Connection, OpenFlags};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static SLOW_SQL_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

/// 连接打开标志
///
/// 说明：
/// - 读写打开但不创建, 库文件不存在时直接失败
/// - Reporting 的只读约束由 query_only 保证; 只读打开的连接在 -shm 缺失时读不了 WAL 库
pub fn open_flags() -> OpenFlags {
    OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys / busy_timeout 需要“每个连接”单独配置
/// - Reporting 连接设置 query_only, 拒绝任何写入
pub fn configure_sqlite_connection(
    conn: &Connection,
    variant: SessionVariant,
    config: &StoreConfig,
) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
    match variant {
        SessionVariant::Standard => {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        }
        SessionVariant::Reporting => {
            conn.execute_batch("PRAGMA query_only = ON;")?;
        }
    }
    Ok(())
}

/// 确保数据库处于 WAL 日志模式, 返回切换后的模式
///
/// WAL 下读事务读取最近一次提交的快照, 写事务（含 EXCLUSIVE）不会阻塞读取。
/// 模式写在库文件里, 已是 WAL 时不加锁直接返回。
pub fn ensure_wal_journal(conn: &Connection) -> rusqlite::Result<String> {
    let mode: String = conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))?;
    if mode.eq_ignore_ascii_case("wal") {
        return Ok(mode);
    }

    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    if !mode.eq_ignore_ascii_case("wal") {
        tracing::warn!(
            target: "session",
            journal_mode = %mode,
            "无法切换到 WAL, 报表读取仍可能等待写锁"
        );
    }
    Ok(mode)
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(
    variant: SessionVariant,
    config: &StoreConfig,
) -> rusqlite::Result<Connection> {
    let mut conn = Connection::open_with_flags(&config.db_path, open_flags())?;
    configure_sqlite_connection(&conn, variant, config)?;
    install_slow_sql_log(&mut conn, config.slow_sql_ms);
    Ok(conn)
}

fn truncate_sql(sql: &str, max_len: usize) -> String {
    let s = sql.trim().replace('\n', " ");
    if s.chars().count() <= max_len {
        return s;
    }
    let cut: String = s.chars().take(max_len).collect();
    format!("{}…", cut)
}

/// 安装慢 SQL 日志（阈值为 0 时只关闭本连接）
///
/// profile 回调是函数指针, 阈值只能放在进程级; 0 不写入, 其他配置的连接不受影响
pub fn install_slow_sql_log(conn: &mut Connection, slow_ms: u64) {
    if slow_ms == 0 {
        conn.profile(None);
        return;
    }
    SLOW_SQL_THRESHOLD_MS.store(slow_ms, Ordering::Relaxed);
    conn.profile(Some(sql_profile_callback));
}

fn sql_profile_callback(sql: &str, duration: Duration) {
    let threshold = SLOW_SQL_THRESHOLD_MS.load(Ordering::Relaxed);
    let ms = duration.as_millis() as u64;
    if threshold > 0 && ms >= threshold {
        tracing::warn!(
            target: "slow_sql",
            duration_ms = ms,
            sql = %truncate_sql(sql, 420),
            "slow sql"
        );
    }
}
