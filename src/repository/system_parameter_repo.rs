// ==========================================
// 井资产只读仓储 - 系统参数仓储
// ==========================================
// 对齐: system_parameters 表 (parameter -> value)
// 实现: 复用 StoreContext::read_scalar_parameter
// ==========================================

use crate::repository::context::StoreContext;
use crate::repository::error::StoreResult;
use std::str::FromStr;

pub const OP_GET_PARAMETER_VALUE: &str = "GetSystemParameter";
pub const OP_GET_PARAMETER_AS: &str = "GetSystemParameterAs";

#[derive(Debug, Clone)]
pub struct SystemParameterRepository {
    ctx: StoreContext,
}

impl SystemParameterRepository {
    pub fn new(ctx: StoreContext) -> Self {
        Self { ctx }
    }

    /// 读取系统参数值
    ///
    /// # 返回
    /// - Ok(Some(value)): 参数存在
    /// - Ok(None): 参数不存在
    pub fn get_parameter_value(
        &self,
        name: &str,
        correlation_id: &str,
    ) -> StoreResult<Option<String>> {
        let scope = self.ctx.begin(OP_GET_PARAMETER_VALUE, correlation_id);

        let value = self.ctx.read_scalar_parameter(name)?;
        if value.is_none() {
            scope.info(&format!("系统参数不存在: {}", name));
        }
        Ok(value)
    }

    /// 读取系统参数值，带默认值
    pub fn get_parameter_or_default(
        &self,
        name: &str,
        default: &str,
        correlation_id: &str,
    ) -> StoreResult<String> {
        Ok(self
            .get_parameter_value(name, correlation_id)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 读取并解析系统参数
    ///
    /// 值无法解析时返回 None, 并输出一条 Info 事件
    pub fn get_parameter_as<T: FromStr>(
        &self,
        name: &str,
        correlation_id: &str,
    ) -> StoreResult<Option<T>> {
        let scope = self.ctx.begin(OP_GET_PARAMETER_AS, correlation_id);

        let raw = match self.ctx.read_scalar_parameter(name)? {
            Some(v) => v,
            None => {
                scope.info(&format!("系统参数不存在: {}", name));
                return Ok(None);
            }
        };

        let parsed = raw.trim().parse::<T>().ok();
        if parsed.is_none() {
            scope.info(&format!("系统参数格式错误: {}={}", name, raw));
        }
        Ok(parsed)
    }
}
