// ==========================================
// 数据工作台 - 领域模型层
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 数据模型
// 依据: data_model_v0.1.md - 实体定义
// ==========================================
// 职责: 定义导入领域实体与类型
// 红线: 不含文件解析逻辑,不含执行逻辑
// ==========================================

pub mod diagnosis;
pub mod file;
pub mod import;

// 重导出核心类型
pub use diagnosis::{
    BatchDiagnosis, ColumnSchema, CompatibilityVerdict, DiagnosisReport, DuplicateEstimate,
    TypeSuggestion,
};
pub use file::{FileDescriptor, FileType};
pub use import::{
    BatchResult, ImportDecision, ImportMode, ImportOperation, ImportPlan, OperationOutcome,
    OperationStatus,
};
