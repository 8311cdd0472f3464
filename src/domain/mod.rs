// ==========================================
// 井资产只读仓储 - 领域层
// ==========================================
// 职责: 查询投影后的结果模型（不可变值对象）
// 红线: 结果模型与表结构解耦, 不含数据访问逻辑
// ==========================================

pub mod lookup;
pub mod node;
pub mod rod;

pub use lookup::{ControlActionModel, ManufacturerModel, StringIdModel};
pub use node::NodeProjected;
pub use rod::RodGradeModel;
