// ==========================================
// 数据工作台 - 文件诊断领域模型
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 导入前诊断
// 依据: data_model_v0.1.md - diagnosis_report 定义
// ==========================================
// 用途: 诊断协作方输出,评估/命名/预览阶段只读
// 红线: 报告不可原地修改,重新诊断产生新报告
// ==========================================

use crate::domain::file::{FileDescriptor, FileType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ColumnSchema - 单列结构信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,      // 列名
    pub data_type: String, // 声明类型（分析引擎类型名，如 BIGINT/VARCHAR）
    pub nullable: bool,    // 是否允许 NULL
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
        }
    }
}

// ==========================================
// TypeSuggestion - 类型优化建议
// ==========================================
// 用途: VARCHAR 列可能更适合的类型（由诊断协作方采样判定）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSuggestion {
    pub column_name: String,        // 列名
    pub current_type: String,       // 当前检测类型
    pub suggested_type: String,     // 建议类型
    pub confidence: f64,            // 置信度（0-100）
    pub sample_values: Vec<String>, // 支持该建议的采样值
}

// ==========================================
// DiagnosisReport - 单文件诊断报告
// ==========================================
// 生命周期: 单次诊断批次内有效,一文件一报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub file_path: String,                     // 被诊断文件路径
    pub file_type: FileType,                   // 文件类型
    pub schema: Vec<ColumnSchema>,             // 列结构（有序）
    pub missing_values: BTreeMap<String, u64>, // 列名 → NULL 计数
    pub row_count: u64,                        // 总行数
    pub file_size_bytes: u64,                  // 文件大小（字节）
    pub type_suggestions: Vec<TypeSuggestion>, // 类型优化建议
    pub diagnosed_at: DateTime<Utc>,           // 诊断时间
}

impl DiagnosisReport {
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }
}

// ==========================================
// CompatibilityVerdict - 结构兼容性裁定
// ==========================================
// 用途: ≥2 份报告的纯函数比较结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityVerdict {
    pub compatible: bool,
}

// ==========================================
// DuplicateEstimate - 跨文件重复行估算
// ==========================================
// 用途: 合并导入前的去重预估,每批次计算一次,不跨批次缓存
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateEstimate {
    pub total_rows: u64,     // 全部文件总行数
    pub duplicate_rows: u64, // 跨文件重复行数
    pub estimated_rows: u64, // 去重后预估行数
    pub skipped: bool,       // 是否跳过计算（不兼容/文件数不足）
}

impl DuplicateEstimate {
    /// 本地合成跳过估算（不调用重复计数协作方）
    ///
    /// # 规则
    /// - skipped = true
    /// - estimated_rows = Σ row_count（报告行数简单求和）
    pub fn skipped_from_reports(reports: &[DiagnosisReport]) -> Self {
        let total: u64 = reports.iter().map(|r| r.row_count).sum();
        Self {
            total_rows: total,
            duplicate_rows: 0,
            estimated_rows: total,
            skipped: true,
        }
    }
}

// ==========================================
// BatchDiagnosis - 诊断阶段汇总
// ==========================================
// 用途: 两阶段工作流的第一阶段输出（诊断 → 用户决策 → 导入）
// 说明: UI 基于此结构展示兼容性与去重预估,再提交 ImportDecision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDiagnosis {
    pub files: Vec<FileDescriptor>,           // 规范化文件描述符（与 reports 对位）
    pub reports: Vec<DiagnosisReport>,        // 每文件诊断报告
    pub compatible: bool,                     // 结构兼容性裁定
    pub duplicate_estimate: DuplicateEstimate, // 跨文件重复行估算
}
