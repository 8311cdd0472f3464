// ==========================================
// 井资产只读仓储 - 核心库
// ==========================================
// 技术栈: Rust + SQLite (rusqlite)
// 系统定位: 油田生产资产的只读数据访问层
// 调用链: 仓储方法 -> 追踪 Start -> 获取会话 -> 关联/过滤/投影 -> 释放会话 -> 追踪 Finish
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 查询结果模型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 配置层 - 运行参数
pub mod config;

// 数据库基础设施（连接打开/PRAGMA 统一）
pub mod db;

// 会话提供者
pub mod session;

// 操作追踪
pub mod tracer;

// 日志系统
pub mod logging;

#[cfg(test)]
pub(crate) mod test_support;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::StoreConfig;

pub use domain::{
    ControlActionModel, ManufacturerModel, NodeProjected, RodGradeModel, StringIdModel,
};

pub use repository::{
    ControlActionRepository, ManufacturerRepository, NodeRepository, RodRepository, StoreContext,
    StoreError, StoreResult, StringIdRepository, SystemParameterRepository,
    TransactionRepository,
};

pub use session::{Session, SessionProvider, SessionVariant, SqliteSessionProvider};

pub use tracer::{LogTracer, MemoryTracer, OperationScope, OperationTracer, TracePhase};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
