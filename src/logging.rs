// ==========================================
// 井资产只读仓储 - 日志订阅者
// ==========================================
// 仓储自身只发事件, 订阅者由宿主进程安装
// 目标 (target):
// - store_trace: 操作 Start/Info/Finish
// - session:     会话获取/释放, 日志模式切换
// - slow_sql:    超过阈值的语句
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 输出格式开关（1/true 时输出 JSON 行）
pub const LOG_JSON_ENV: &str = "WELL_STORE_LOG_JSON";

/// 未设置 RUST_LOG 时的过滤器: 操作事件保留 info, 慢 SQL 始终可见
const DEFAULT_FILTER: &str = "info,store_trace=info,session=warn,slow_sql=warn";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// 按 `WELL_STORE_LOG_JSON` 选择格式
    pub fn from_env() -> Self {
        match std::env::var(LOG_JSON_ENV) {
            Ok(v) => Self::parse(&v),
            Err(_) => LogFormat::Text,
        }
    }

    fn parse(raw: &str) -> Self {
        if matches!(raw.trim().to_lowercase().as_str(), "1" | "true") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// 安装全局订阅者
///
/// RUST_LOG 优先, 例如 `RUST_LOG=store_trace=debug,session=trace`。
/// 已有订阅者时保持原样。
///
/// ```no_run
/// use well_asset_store::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with(LogFormat::from_env());
}

/// 以指定格式安装全局订阅者
pub fn init_with(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = match format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(false)
            .try_init(),
        LogFormat::Text => fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
    };
}

/// 测试用订阅者: 全部 trace 级事件写入测试输出
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("trace"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse(" TRUE "), LogFormat::Json);
        assert_eq!(LogFormat::parse("1"), LogFormat::Json);
        assert_eq!(LogFormat::parse("0"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
