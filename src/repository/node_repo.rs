// ==========================================
// 井资产只读仓储 - 节点/井状态仓储
// ==========================================
// 对齐: node_master 表
// 红线: Repository 不含业务逻辑, 只做查询与投影
// ==========================================

use crate::domain::NodeProjected;
use crate::repository::context::StoreContext;
use crate::repository::error::StoreResult;
use crate::repository::sql::NODE_PROJECTED_CTE;
use crate::session::SessionVariant;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

pub const OP_GET_WELL_ENABLED_STATUS: &str = "GetWellEnabledStatus";
pub const OP_GET_NODE_PROJECTED: &str = "GetNodeProjected";
pub const OP_GET_NODE_ID: &str = "GetNodeId";

// GUID 文本大小写不定; 参数用 Uuid 的小写文本, 左侧 lower() 对应表达式索引
const ENABLED_STATUS_SQL: &str = "SELECT enabled FROM node_master WHERE lower(asset_guid) = ?1";
const NODE_ID_SQL: &str = "SELECT node_id FROM node_master WHERE lower(asset_guid) = ?1";

// ==========================================
// NodeRepository - 节点仓储
// ==========================================
#[derive(Debug, Clone)]
pub struct NodeRepository {
    ctx: StoreContext,
}

impl NodeRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { ctx }
    }

    /// 查询井的启用状态
    ///
    /// # 返回
    /// - Ok(Some(enabled)): 资产存在
    /// - Ok(None): 资产不存在（输出一条 Info 事件）
    /// - Err: 会话获取失败或查询失败
    pub fn get_well_enabled_status(
        &self,
        asset_guid: &Uuid,
        correlation_id: &str,
    ) -> StoreResult<Option<bool>> {
        let scope = self.ctx.begin(OP_GET_WELL_ENABLED_STATUS, correlation_id);
        let session = self.ctx.acquire(SessionVariant::Reporting)?;

        let enabled = session
            .conn()
            .query_row(ENABLED_STATUS_SQL, params![asset_guid.to_string()], |row| {
                row.get::<_, bool>(0)
            })
            .optional()?;
        session.release();

        if enabled.is_none() {
            scope.info(&format!("未找到资产 asset_guid={}", asset_guid));
        }
        Ok(enabled)
    }

    /// 查询资产的节点投影
    pub fn get_node_projected(
        &self,
        asset_guid: &Uuid,
        correlation_id: &str,
    ) -> StoreResult<Option<NodeProjected>> {
        let scope = self.ctx.begin(OP_GET_NODE_PROJECTED, correlation_id);
        let session = self.ctx.acquire(SessionVariant::Reporting)?;

        let sql = format!(
            r#"
            WITH {}
            SELECT asset_guid, node_id, poc_type, customer_guid
            FROM node_projected
            WHERE lower(asset_guid) = ?1
            "#,
            NODE_PROJECTED_CTE
        );
        let node = session
            .conn()
            .query_row(&sql, params![asset_guid.to_string()], map_node_projected)
            .optional()?;
        session.release();

        if node.is_none() {
            scope.info(&format!("未找到资产 asset_guid={}", asset_guid));
        }
        Ok(node)
    }

    /// 查询资产对应的节点 ID
    pub fn get_node_id(&self, asset_guid: &Uuid, correlation_id: &str) -> StoreResult<Option<String>> {
        let scope = self.ctx.begin(OP_GET_NODE_ID, correlation_id);
        let session = self.ctx.acquire(SessionVariant::Reporting)?;

        let node_id = session
            .conn()
            .query_row(NODE_ID_SQL, params![asset_guid.to_string()], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        session.release();

        if node_id.is_none() {
            scope.info(&format!("未找到资产 asset_guid={}", asset_guid));
        }
        Ok(node_id)
    }
}

fn parse_guid(idx: usize, raw: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn map_node_projected(row: &Row<'_>) -> rusqlite::Result<NodeProjected> {
    let asset_guid = parse_guid(0, &row.get::<_, String>(0)?)?;
    let customer_guid = row
        .get::<_, Option<String>>(3)?
        .map(|raw| parse_guid(3, &raw))
        .transpose()?;

    Ok(NodeProjected {
        asset_guid,
        node_id: row.get(1)?,
        poc_type: row.get(2)?,
        customer_guid,
    })
}
