// ==========================================
// 井资产只读仓储 - 操作追踪
// ==========================================
// 职责: 为每个仓储操作输出 Start / Info / Finish 事件
// 约束: 只产生副作用, 不影响控制流与返回值
// 约束: 每个操作恰好一个 Start 与一个 Finish (OperationScope 保证)
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;
use std::time::Instant;

// ==========================================
// TracePhase - 事件阶段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TracePhase {
    Start,
    Info,
    Finish,
}

impl TracePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TracePhase::Start => "start",
            TracePhase::Info => "info",
            TracePhase::Finish => "finish",
        }
    }
}

impl fmt::Display for TracePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 操作追踪器
pub trait OperationTracer: Send + Sync {
    fn trace(&self, operation: &str, correlation_id: &str, phase: TracePhase, message: &str);
}

// ==========================================
// LogTracer - 基于 tracing 的默认实现
// ==========================================
/// 输出到 tracing（target = "store_trace"）
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl OperationTracer for LogTracer {
    fn trace(&self, operation: &str, correlation_id: &str, phase: TracePhase, message: &str) {
        match phase {
            TracePhase::Start | TracePhase::Finish => tracing::debug!(
                target: "store_trace",
                op = operation,
                correlation_id = correlation_id,
                phase = phase.as_str(),
                "{}",
                message
            ),
            TracePhase::Info => tracing::info!(
                target: "store_trace",
                op = operation,
                correlation_id = correlation_id,
                phase = phase.as_str(),
                "{}",
                message
            ),
        }
    }
}

// ==========================================
// MemoryTracer - 内存记录（断言/诊断用）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub operation: String,
    pub correlation_id: String,
    pub phase: TracePhase,
    pub message: String,
    pub recorded_at: DateTime<Utc>,
}

/// 把事件记录在内存中
#[derive(Debug, Default)]
pub struct MemoryTracer {
    records: Mutex<Vec<TraceRecord>>,
}

impl MemoryTracer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前全部记录的快照
    pub fn records(&self) -> Vec<TraceRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// 某个关联 ID 的记录（按发生顺序）
    pub fn records_for(&self, correlation_id: &str) -> Vec<TraceRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.correlation_id == correlation_id)
            .collect()
    }

    /// 某个关联 ID 的阶段序列
    pub fn phases_for(&self, correlation_id: &str) -> Vec<TracePhase> {
        self.records_for(correlation_id)
            .into_iter()
            .map(|r| r.phase)
            .collect()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl OperationTracer for MemoryTracer {
    fn trace(&self, operation: &str, correlation_id: &str, phase: TracePhase, message: &str) {
        let record = TraceRecord {
            operation: operation.to_string(),
            correlation_id: correlation_id.to_string(),
            phase,
            message: message.to_string(),
            recorded_at: Utc::now(),
        };
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record);
    }
}

// ==========================================
// OperationScope - 操作范围 Guard
// ==========================================
/// 创建时输出 Start, 析构时输出 Finish（含 elapsed_ms）
///
/// 使用方式：
/// ```ignore
/// let scope = OperationScope::begin(tracer, "GetRodGrades", correlation_id);
/// // do work...
/// scope.info("node id 列表为空");
/// ```
pub struct OperationScope<'a> {
    tracer: &'a dyn OperationTracer,
    operation: &'static str,
    correlation_id: &'a str,
    start: Instant,
}

impl<'a> OperationScope<'a> {
    pub fn begin(
        tracer: &'a dyn OperationTracer,
        operation: &'static str,
        correlation_id: &'a str,
    ) -> Self {
        tracer.trace(operation, correlation_id, TracePhase::Start, "start");
        Self {
            tracer,
            operation,
            correlation_id,
            start: Instant::now(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn info(&self, message: &str) {
        self.tracer
            .trace(self.operation, self.correlation_id, TracePhase::Info, message);
    }
}

impl Drop for OperationScope<'_> {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        self.tracer.trace(
            self.operation,
            self.correlation_id,
            TracePhase::Finish,
            &format!("done elapsed_ms={}", elapsed_ms),
        );
    }
}
