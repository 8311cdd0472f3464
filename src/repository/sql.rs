// ==========================================
// 井资产只读仓储 - SQL 公共片段
// ==========================================
// 职责: 共享的 CTE 与 IN 子句构建
// 约束: 所有值都走参数绑定, 这里只拼接占位符
// ==========================================

/// 节点投影 CTE
///
/// 跨实体查询统一经过 node_projected（asset_guid, node_id, poc_type, customer_guid）
pub const NODE_PROJECTED_CTE: &str = r#"
    node_projected AS (
        SELECT asset_guid, node_id, poc_type, customer_guid
        FROM node_master
    )
"#;

/// SQLite 单条语句可绑定参数的安全上限
pub const MAX_BOUND_PARAMS: usize = 500;

/// 构建 IN 子句的 SQL 片段
///
/// # 示例
/// ```
/// use well_asset_store::repository::sql::build_in_clause;
///
/// let clause = build_in_clause("r.node_id", 3);
/// assert_eq!(clause, "r.node_id IN (?, ?, ?)");
///
/// // 空列表返回永假条件
/// assert_eq!(build_in_clause("r.node_id", 0), "1 = 0");
/// ```
pub fn build_in_clause(column_name: &str, count: usize) -> String {
    if count == 0 {
        return "1 = 0".to_string();
    }

    let placeholders = vec!["?"; count].join(", ");
    format!("{} IN ({})", column_name, placeholders)
}
