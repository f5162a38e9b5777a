// ==========================================
// 数据工作台 - 导入决策/计划/结果模型
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 导入计划与执行
// 依据: data_model_v0.1.md - import_operation/batch_result 定义
// ==========================================
// 红线: 操作构建后不可变,结果按执行顺序追加
// ==========================================

use crate::domain::diagnosis::DuplicateEstimate;
use crate::domain::file::FileDescriptor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ==========================================
// ImportMode - 单操作导入模式
// ==========================================
// replace: 建表（覆盖已有表）
// append: 向已有表追加行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    Replace,
    Append,
}

// ==========================================
// ImportDecision - 用户决策输入
// ==========================================
// 用途: 两阶段工作流中 UI 在诊断后注入的选择
// 红线: deduplicate 仅在 merge=true 时有意义,
//       计划构建器必须拒绝对独立导入静默去重
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportDecision {
    pub merge: bool,       // 是否合并为单表
    pub deduplicate: bool, // 合并追加时是否去重
    // 文件序号 → 目标表名覆盖（可选,未提供则由分配器派生）
    #[serde(default)]
    pub table_names: BTreeMap<usize, String>,
}

impl ImportDecision {
    /// 独立导入决策（每文件一表）
    pub fn independent() -> Self {
        Self::default()
    }

    /// 合并导入决策
    pub fn merged(deduplicate: bool) -> Self {
        Self {
            merge: true,
            deduplicate,
            table_names: BTreeMap::new(),
        }
    }
}

// ==========================================
// ImportOperation - 单次导入操作
// ==========================================
// 生命周期: 计划构建时创建,构建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOperation {
    pub source: FileDescriptor, // 源文件
    pub target_table: String,   // 目标表名
    pub mode: ImportMode,       // 导入模式
    pub overwrite: bool,        // replace 模式下是否先删除已有表
    pub deduplicate: bool,      // append 模式下是否跳过与已有行完全重复的行
    pub order_index: usize,     // 批次内执行顺序（执行器严格按此顺序）
}

// ==========================================
// ImportPlan - 批次导入计划
// ==========================================
// merged 标记决定执行器的失败语义:
// - merged: 操作 0 失败则中止整批（后续操作不再尝试）
// - 独立: 每个操作独立尝试,互不影响
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPlan {
    pub operations: Vec<ImportOperation>,
    pub merged: bool,
}

impl ImportPlan {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

// ==========================================
// OperationStatus / OperationOutcome - 单操作结局
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub operation: ImportOperation,
    pub status: OperationStatus,
    pub error: Option<String>, // 失败时的错误信息
}

// ==========================================
// BatchResult - 批次执行结果
// ==========================================
// 生命周期: 执行器创建空结果 → 严格按操作顺序追加 →
//           全部可达操作尝试完毕后一次性返回（不部分返回）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: String,                             // 批次 ID（UUID）
    pub operations: Vec<OperationOutcome>,            // 按执行顺序的操作结局
    pub success_count: usize,                         // 成功操作数
    pub fail_count: usize,                            // 失败操作数
    pub duplicate_estimate: Option<DuplicateEstimate>, // 执行前的去重预估（仅合并导入）
    pub started_at: DateTime<Utc>,                    // 批次开始时间
    pub elapsed_ms: u64,                              // 批次耗时（毫秒）
}

impl BatchResult {
    /// 创建空结果（批次开始时）
    pub fn new() -> Self {
        Self {
            batch_id: Uuid::new_v4().to_string(),
            operations: Vec::new(),
            success_count: 0,
            fail_count: 0,
            duplicate_estimate: None,
            started_at: Utc::now(),
            elapsed_ms: 0,
        }
    }

    /// 记录成功操作（按执行顺序调用）
    pub fn record_success(&mut self, operation: ImportOperation) {
        self.operations.push(OperationOutcome {
            operation,
            status: OperationStatus::Success,
            error: None,
        });
        self.success_count += 1;
    }

    /// 记录失败操作（按执行顺序调用）
    pub fn record_failure(&mut self, operation: ImportOperation, error: String) {
        self.operations.push(OperationOutcome {
            operation,
            status: OperationStatus::Failed,
            error: Some(error),
        });
        self.fail_count += 1;
    }

    /// 是否全部操作成功
    pub fn all_succeeded(&self) -> bool {
        self.fail_count == 0
    }
}

impl Default for BatchResult {
    fn default() -> Self {
        Self::new()
    }
}
