// ==========================================
// 井资产只读仓储 - 事务存在性检查
// ==========================================
// 对齐: transactions 表
// 隔离: 使用 Standard 会话（结果可能决定后续写入, 不允许脏读）
// ==========================================

use crate::repository::context::StoreContext;
use crate::repository::error::StoreResult;
use crate::session::SessionVariant;
use rusqlite::params;

pub const OP_TRANSACTION_ID_EXISTS: &str = "TransactionIdExists";

#[derive(Debug, Clone)]
pub struct TransactionRepository {
    ctx: StoreContext,
}

impl TransactionRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { ctx }
    }

    /// 检查事务 ID 是否存在
    pub fn transaction_id_exists(&self, transaction_id: i64, correlation_id: &str) -> StoreResult<bool> {
        let _scope = self.ctx.begin(OP_TRANSACTION_ID_EXISTS, correlation_id);
        let session = self.ctx.acquire(SessionVariant::Standard)?;

        let exists: bool = session.conn().query_row(
            "SELECT EXISTS (SELECT 1 FROM transactions WHERE transaction_id = ?1)",
            params![transaction_id],
            |row| row.get(0),
        )?;
        session.release();

        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;
    use crate::tracer::TracePhase;

    #[test]
    fn test_transaction_id_exists() {
        let db = TestDb::new();
        db.seed("INSERT INTO transactions (transaction_id, node_id) VALUES (42, 'Well-01');");
        let (ctx, tracer) = db.context();
        let repo = TransactionRepository::new(ctx);

        assert!(repo.transaction_id_exists(42, "c1").unwrap());
        assert!(!repo.transaction_id_exists(500, "c2").unwrap());
        assert_eq!(tracer.phases_for("c2"), vec![TracePhase::Start, TracePhase::Finish]);
    }
}
