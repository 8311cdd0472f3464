// ==========================================
// 井资产只读仓储 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑, 只做查询与投影
// 约束: 所有查询使用参数化, 防止 SQL 注入
// 约束: 每次调用独立获取会话, 不缓存任何结果
// ==========================================

pub mod context;
pub mod control_action_repo;
pub mod error;
pub mod manufacturer_repo;
pub mod node_repo;
pub mod rod_repo;
pub mod sql;
pub mod string_id_repo;
pub mod system_parameter_repo;
pub mod transaction_repo;

// 重导出核心仓储
pub use context::{StoreContext, StoreContextBuilder};
pub use control_action_repo::ControlActionRepository;
pub use error::{StoreError, StoreResult};
pub use manufacturer_repo::ManufacturerRepository;
pub use node_repo::NodeRepository;
pub use rod_repo::RodRepository;
pub use string_id_repo::StringIdRepository;
pub use system_parameter_repo::SystemParameterRepository;
pub use transaction_repo::TransactionRepository;
