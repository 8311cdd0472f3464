// ==========================================
// 井资产只读仓储 - 制造商仓储
// ==========================================
// 对齐: manufacturers 表, 按主键查找, 无关联
// ==========================================

use crate::domain::ManufacturerModel;
use crate::repository::context::StoreContext;
use crate::repository::error::StoreResult;
use crate::session::SessionVariant;
use rusqlite::{params, OptionalExtension};

pub const OP_GET_MANUFACTURER: &str = "GetManufacturer";

#[derive(Debug, Clone)]
pub struct ManufacturerRepository {
    ctx: StoreContext,
}

impl ManufacturerRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { ctx }
    }

    /// 按制造商 ID 查询
    ///
    /// # 返回
    /// - Ok(Some(ManufacturerModel)): 找到
    /// - Ok(None): 未找到
    /// - Err: 会话获取失败或查询失败
    pub fn get_manufacturer(
        &self,
        manufacturer_id: i32,
        correlation_id: &str,
    ) -> StoreResult<Option<ManufacturerModel>> {
        let _scope = self.ctx.begin(OP_GET_MANUFACTURER, correlation_id);
        let session = self.ctx.acquire(SessionVariant::Reporting)?;

        let manufacturer = session
            .conn()
            .query_row(
                "SELECT manuf_id, manuf FROM manufacturers WHERE manuf_id = ?1",
                params![manufacturer_id],
                |row| {
                    Ok(ManufacturerModel {
                        manufacturer_id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        session.release();

        Ok(manufacturer)
    }
}
