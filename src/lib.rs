// ==========================================
// 数据工作台 - 文件导入引擎核心库
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 导入协调与执行流程
// 技术栈: Tauri + Rust + 嵌入式分析引擎
// 系统定位: 导入协调引擎 (UI 层只提供决策输入)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 诊断/兼容性/计划/执行
pub mod importer;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    BatchDiagnosis, BatchResult, ColumnSchema, CompatibilityVerdict, DiagnosisReport,
    DuplicateEstimate, FileDescriptor, FileType, ImportDecision, ImportMode, ImportOperation,
    ImportPlan, OperationOutcome, OperationStatus, TypeSuggestion,
};
pub use importer::{
    DiagnosisClient, DiagnosisService, DuplicateCounter, EngineOptions, ImportEngine,
    ImportEngineImpl, ImportError, TableImporter,
};
