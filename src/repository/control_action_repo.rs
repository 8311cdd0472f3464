// ==========================================
// 井资产只读仓储 - 控制动作仓储
// ==========================================
// 关联: control_actions ⋈ poc_type_actions ⋈ node_projected (poc_type)
// 去重: SQL DISTINCT
// 排序: control_action_id 升序（额外加的, 让结果不依赖查询计划）
// 红线: Repository 不含业务逻辑, 只做查询与投影
// ==========================================

use crate::domain::ControlActionModel;
use crate::repository::context::StoreContext;
use crate::repository::error::StoreResult;
use crate::repository::sql::NODE_PROJECTED_CTE;
use crate::session::SessionVariant;
use rusqlite::{params, Connection, Result as SqliteResult};
use uuid::Uuid;

pub const OP_GET_CONTROL_ACTIONS: &str = "GetControlActions";

#[derive(Debug, Clone)]
pub struct ControlActionRepository {
    ctx: StoreContext,
}

impl ControlActionRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { ctx }
    }

    /// 查询资产 POC 类型支持的控制动作
    ///
    /// # 返回
    /// - Ok(Vec<ControlActionModel>): 去重后的控制动作, 按控制动作 ID 升序
    ///   （连接顺序本身不稳定, 排序是有意加上的）; 无匹配时为空
    /// - Err: 会话获取失败或查询失败
    pub fn get_control_actions(
        &self,
        asset_guid: &Uuid,
        correlation_id: &str,
    ) -> StoreResult<Vec<ControlActionModel>> {
        let _scope = self.ctx.begin(OP_GET_CONTROL_ACTIONS, correlation_id);
        let session = self.ctx.acquire(SessionVariant::Reporting)?;

        let actions = query_control_actions(session.conn(), asset_guid)?;
        session.release();

        Ok(actions)
    }
}

fn query_control_actions(
    conn: &Connection,
    asset_guid: &Uuid,
) -> SqliteResult<Vec<ControlActionModel>> {
    let sql = format!(
        r#"
        WITH {}
        SELECT DISTINCT ca.control_action_id, ca.description
        FROM control_actions ca
        JOIN poc_type_actions pta ON pta.control_action_id = ca.control_action_id
        JOIN node_projected n ON n.poc_type = pta.poc_type
        WHERE lower(n.asset_guid) = ?1
        ORDER BY ca.control_action_id ASC
        "#,
        NODE_PROJECTED_CTE
    );

    let mut stmt = conn.prepare(&sql)?;
    let actions = stmt
        .query_map(params![asset_guid.to_string()], |row| {
            Ok(ControlActionModel {
                control_action_id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<SqliteResult<Vec<_>>>()?;

    Ok(actions)
}
