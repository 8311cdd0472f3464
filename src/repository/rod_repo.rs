// ==========================================
// 井资产只读仓储 - 抽油杆钢级仓储
// ==========================================
// 关联: rods ⋈ rod_grades (rod_grade_id)
// 排序: node_id 升序, rod_num 升序
// 去重: (node_id, rod_num, name) 相同的行只保留一条
// ==========================================

use crate::domain::RodGradeModel;
use crate::repository::context::StoreContext;
use crate::repository::error::StoreResult;
use crate::repository::sql::{build_in_clause, MAX_BOUND_PARAMS};
use crate::session::SessionVariant;
use rusqlite::{params_from_iter, Connection, Result as SqliteResult};
use std::collections::BTreeSet;

pub const OP_GET_ROD_GRADES: &str = "GetRodGrades";

#[derive(Debug, Clone)]
pub struct RodRepository {
    ctx: StoreContext,
}

impl RodRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { ctx }
    }

    /// 查询一组节点的抽油杆钢级
    ///
    /// # 参数
    /// - `node_ids`: 节点 ID 列表（可重复, 为空时直接返回空列表）
    ///
    /// # 返回
    /// - Ok(Vec<RodGradeModel>): 去重并按 (node_id, rod_num) 排序
    /// - Err: 会话获取失败或查询失败
    pub fn get_rod_grades<S: AsRef<str>>(
        &self,
        node_ids: &[S],
        correlation_id: &str,
    ) -> StoreResult<Vec<RodGradeModel>> {
        let scope = self.ctx.begin(OP_GET_ROD_GRADES, correlation_id);

        let node_ids: Vec<&str> = node_ids
            .iter()
            .map(|id| id.as_ref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if node_ids.is_empty() {
            scope.info("node id 列表为空");
            return Ok(Vec::new());
        }

        let session = self.ctx.acquire(SessionVariant::Reporting)?;

        // 按参数上限分批, 合并后统一去重排序
        let mut merged = BTreeSet::new();
        for chunk in node_ids.chunks(MAX_BOUND_PARAMS) {
            merged.extend(query_rod_grades(session.conn(), chunk)?);
        }
        session.release();

        Ok(merged.into_iter().collect())
    }
}

fn query_rod_grades(conn: &Connection, node_ids: &[&str]) -> SqliteResult<Vec<RodGradeModel>> {
    let sql = format!(
        r#"
        SELECT DISTINCT r.node_id, r.rod_num, rg.name
        FROM rods r
        JOIN rod_grades rg ON rg.rod_grade_id = r.rod_grade_id
        WHERE {}
        ORDER BY r.node_id ASC, r.rod_num ASC
        "#,
        build_in_clause("r.node_id", node_ids.len())
    );

    let mut stmt = conn.prepare(&sql)?;
    let rods = stmt
        .query_map(params_from_iter(node_ids.iter()), |row| {
            Ok(RodGradeModel {
                node_id: row.get(0)?,
                rod_num: row.get(1)?,
                name: row.get(2)?,
            })
        })?
        .collect::<SqliteResult<Vec<_>>>()?;

    Ok(rods)
}
