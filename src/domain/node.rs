// ==========================================
// 井资产只读仓储 - 节点投影
// ==========================================
// 对齐: node_master 表
// 用途: 所有按 POC 类型 / node id 关联的查询都经过该形状
// ==========================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// NodeProjected - 资产与节点的关联面
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeProjected {
    pub asset_guid: Uuid,            // 资产 GUID (全局唯一)
    pub node_id: String,             // 逻辑节点 ID
    pub poc_type: i32,               // POC 类型代码
    pub customer_guid: Option<Uuid>, // 所属客户 (可空)
}
