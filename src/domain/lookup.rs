// ==========================================
// 井资产只读仓储 - 查找类结果模型
// ==========================================
// 对齐: control_actions / manufacturers / string_ids 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ControlActionModel - 控制动作
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlActionModel {
    pub control_action_id: i32, // 控制动作 ID
    pub name: String,           // 描述
}

// ==========================================
// ManufacturerModel - 制造商
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerModel {
    pub manufacturer_id: i32,
    pub name: String,
}

// ==========================================
// StringIdModel - 字符串标识
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringIdModel {
    pub string_id: i32,
    pub string_name: String,
    pub contact_list_id: Option<i32>,   // 关联联系人列表
    pub responder_list_id: Option<i32>, // 关联响应人列表
}
