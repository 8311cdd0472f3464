// ==========================================
// 井资产只读仓储 - 仓储基础上下文
// ==========================================
// 职责: 会话获取委托 + 追踪器 + 通用单值参数读取
// 红线: 不含关联查询与业务逻辑
// ==========================================

use crate::config::StoreConfig;
use crate::repository::error::{StoreError, StoreResult};
use crate::session::{Session, SessionProvider, SessionVariant, SqliteSessionProvider};
use crate::tracer::{LogTracer, OperationScope, OperationTracer};
use rusqlite::{params, OptionalExtension};
use std::fmt;
use std::sync::Arc;

// ==========================================
// StoreContext - 所有仓储共享的基础
// ==========================================
#[derive(Clone)]
pub struct StoreContext {
    sessions: Arc<dyn SessionProvider>,
    tracer: Arc<dyn OperationTracer>,
}

impl StoreContext {
    pub fn builder() -> StoreContextBuilder {
        StoreContextBuilder::default()
    }

    /// 按配置创建: SQLite 会话工厂 + tracing 追踪器
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let provider = SqliteSessionProvider::new(config.clone())?;
        Self::builder()
            .session_provider(Arc::new(provider))
            .tracer(Arc::new(LogTracer))
            .build()
    }

    /// 获取会话
    pub fn acquire(&self, variant: SessionVariant) -> StoreResult<Session> {
        self.sessions.acquire(variant)
    }

    /// 开始一个被追踪的操作
    pub fn begin<'a>(&'a self, operation: &'static str, correlation_id: &'a str) -> OperationScope<'a> {
        OperationScope::begin(self.tracer.as_ref(), operation, correlation_id)
    }

    pub fn tracer(&self) -> &dyn OperationTracer {
        self.tracer.as_ref()
    }

    /// 读取单值系统参数
    ///
    /// # 返回
    /// - Ok(Some(value)): 参数存在且值非空
    /// - Ok(None): 参数不存在或值为 NULL
    /// - Err: 会话获取失败或查询失败
    pub fn read_scalar_parameter(&self, name: &str) -> StoreResult<Option<String>> {
        let session = self.acquire(SessionVariant::Reporting)?;

        let value = session
            .conn()
            .query_row(
                "SELECT value FROM system_parameters WHERE parameter = ?1",
                params![name],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten();

        session.release();
        Ok(value)
    }
}

impl fmt::Debug for StoreContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreContext").finish_non_exhaustive()
    }
}

// ==========================================
// StoreContextBuilder - 构造期依赖校验
// ==========================================
#[derive(Default)]
pub struct StoreContextBuilder {
    sessions: Option<Arc<dyn SessionProvider>>,
    tracer: Option<Arc<dyn OperationTracer>>,
}

impl StoreContextBuilder {
    pub fn session_provider(mut self, sessions: Arc<dyn SessionProvider>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub fn tracer(mut self, tracer: Arc<dyn OperationTracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// 构造上下文; 任一依赖缺失返回 InvalidConfiguration
    pub fn build(self) -> StoreResult<StoreContext> {
        let sessions = self.sessions.ok_or_else(|| {
            StoreError::InvalidConfiguration("缺少 session provider".to_string())
        })?;
        let tracer = self
            .tracer
            .ok_or_else(|| StoreError::InvalidConfiguration("缺少 operation tracer".to_string()))?;

        Ok(StoreContext { sessions, tracer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;
    use crate::tracer::MemoryTracer;

    #[test]
    fn test_build_requires_session_provider() {
        let err = StoreContext::builder()
            .tracer(Arc::new(MemoryTracer::new()))
            .build()
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfiguration(ref m) if m.contains("session")));
    }

    #[test]
    fn test_build_requires_tracer() {
        let db = TestDb::new();
        let provider = SqliteSessionProvider::new(db.config()).unwrap();
        let err = StoreContext::builder()
            .session_provider(Arc::new(provider))
            .build()
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfiguration(ref m) if m.contains("tracer")));
    }

    #[test]
    fn test_from_config_rejects_empty_path() {
        let err = StoreContext::from_config(&StoreConfig::new("")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_read_scalar_parameter() {
        let db = TestDb::new();
        db.seed(
            r#"
            INSERT INTO system_parameters (parameter, value) VALUES ('ScanInterval', '15');
            INSERT INTO system_parameters (parameter, value) VALUES ('NullValued', NULL);
            "#,
        );
        let (ctx, _tracer) = db.context();

        assert_eq!(
            ctx.read_scalar_parameter("ScanInterval").unwrap(),
            Some("15".to_string())
        );
        assert_eq!(ctx.read_scalar_parameter("NullValued").unwrap(), None);
        assert_eq!(ctx.read_scalar_parameter("Missing").unwrap(), None);
    }
}
