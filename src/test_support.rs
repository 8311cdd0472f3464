// ==========================================
// 单元测试公共工具
// ==========================================
// 临时文件 SQLite 库 + 测试 schema + 内存追踪器
// ==========================================

use crate::config::StoreConfig;
use crate::repository::context::StoreContext;
use crate::session::SqliteSessionProvider;
use crate::tracer::MemoryTracer;
use rusqlite::Connection;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const SCHEMA_SQL: &str = include_str!("../tests/fixtures/well_store_schema.sql");

pub struct TestDb {
    _temp_file: NamedTempFile,
    db_path: String,
}

impl TestDb {
    pub fn new() -> Self {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();

        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(SCHEMA_SQL).unwrap();

        Self {
            _temp_file: temp_file,
            db_path,
        }
    }

    pub fn config(&self) -> StoreConfig {
        StoreConfig::new(self.db_path.clone())
    }

    /// 写入种子数据（使用独立连接, 写完即关闭）
    pub fn seed(&self, sql: &str) {
        let conn = Connection::open(&self.db_path).unwrap();
        conn.execute_batch(sql).unwrap();
    }

    /// 构造带内存追踪器的上下文
    pub fn context(&self) -> (StoreContext, Arc<MemoryTracer>) {
        let tracer = Arc::new(MemoryTracer::new());
        let provider = SqliteSessionProvider::new(self.config()).unwrap();
        let ctx = StoreContext::builder()
            .session_provider(Arc::new(provider))
            .tracer(tracer.clone())
            .build()
            .unwrap();
        (ctx, tracer)
    }
}
