// ==========================================
// 井资产只读仓储 - 字符串标识仓储
// ==========================================
// 对齐: string_ids 表, 全量读取, 按名称升序
// ==========================================

use crate::domain::StringIdModel;
use crate::repository::context::StoreContext;
use crate::repository::error::StoreResult;
use crate::session::SessionVariant;
use rusqlite::{Connection, Result as SqliteResult};

pub const OP_GET_STRING_IDS: &str = "GetStringIds";

#[derive(Debug, Clone)]
pub struct StringIdRepository {
    ctx: StoreContext,
}

impl StringIdRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { ctx }
    }

    /// 查询全部字符串标识（按 string_name 升序, 同名按 string_id 升序）
    pub fn get_string_ids(&self, correlation_id: &str) -> StoreResult<Vec<StringIdModel>> {
        let _scope = self.ctx.begin(OP_GET_STRING_IDS, correlation_id);
        let session = self.ctx.acquire(SessionVariant::Reporting)?;

        let string_ids = query_string_ids(session.conn())?;
        session.release();

        Ok(string_ids)
    }
}

fn query_string_ids(conn: &Connection) -> SqliteResult<Vec<StringIdModel>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT string_id, string_name, contact_list_id, responder_list_id
        FROM string_ids
        ORDER BY string_name ASC, string_id ASC
        "#,
    )?;

    let string_ids = stmt
        .query_map([], |row| {
            Ok(StringIdModel {
                string_id: row.get(0)?,
                string_name: row.get(1)?,
                contact_list_id: row.get(2)?,
                responder_list_id: row.get(3)?,
            })
        })?
        .collect::<SqliteResult<Vec<_>>>()?;

    Ok(string_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;

    #[test]
    fn test_sorted_by_name() {
        let db = TestDb::new();
        db.seed(
            r#"
            INSERT INTO string_ids (string_id, string_name, contact_list_id, responder_list_id)
            VALUES (1, 'Pump Off', 10, NULL);
            INSERT INTO string_ids (string_id, string_name, contact_list_id, responder_list_id)
            VALUES (2, 'Comm Fail', NULL, 20);
            INSERT INTO string_ids (string_id, string_name, contact_list_id, responder_list_id)
            VALUES (3, 'High Load', 11, 21);
            "#,
        );
        let (ctx, _tracer) = db.context();
        let repo = StringIdRepository::new(ctx);

        let ids = repo.get_string_ids("c").unwrap();
        let names: Vec<&str> = ids.iter().map(|s| s.string_name.as_str()).collect();
        assert_eq!(names, vec!["Comm Fail", "High Load", "Pump Off"]);
        assert_eq!(ids[0].contact_list_id, None);
        assert_eq!(ids[0].responder_list_id, Some(20));
        assert_eq!(ids[2].contact_list_id, Some(10));
    }

    #[test]
    fn test_empty_table() {
        let db = TestDb::new();
        let (ctx, _tracer) = db.context();
        let repo = StringIdRepository::new(ctx);

        assert!(repo.get_string_ids("c").unwrap().is_empty());
    }
}
