// ==========================================
// 数据工作台 - 导入层
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 导入协调与执行
// ==========================================
// 职责: 文件解析、诊断编排、兼容性裁定、
//       去重预估、计划构建、顺序执行
// ==========================================

// 模块声明
pub mod compatibility;
pub mod diagnosis_client;
pub mod duplicate;
pub mod error;
pub mod executor;
pub mod file_resolver;
pub mod import_engine_impl;
pub mod import_engine_trait;
pub mod naming;
pub mod plan;
pub mod retry;

// 重导出核心类型
pub use diagnosis_client::DiagnosisClient;
pub use error::{ImportError, ImportResult};
pub use import_engine_impl::{EngineOptions, ImportEngineImpl};

// 重导出 Trait 接口
pub use import_engine_trait::{DiagnosisService, DuplicateCounter, ImportEngine, TableImporter};
