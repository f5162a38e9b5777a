// ==========================================
// 数据工作台 - 导入模块错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// ==========================================
// 传播策略:
// - 批次级以下错误（单操作失败）捕获进 BatchResult,不抛出
// - 批次级及以上错误（决策无效/诊断失败）作为入口硬失败返回
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件格式不支持: {0}（仅支持 .csv/.parquet）")]
    UnsupportedFormat(String),

    // ===== 决策契约错误 =====
    #[error("无效的导入决策: {0}")]
    InvalidDecision(String),

    // ===== 协作方错误 =====
    #[error("诊断失败: {0}")]
    DiagnosisFailure(String),

    #[error("重复行计数失败: {0}")]
    DuplicateCountFailure(String),

    #[error("表导入失败 (表 {table}): {message}")]
    TableImportFailure { table: String, message: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
