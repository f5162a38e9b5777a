// ==========================================
// 数据工作台 - 导入引擎 Trait
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 协作方契约
// 职责: 定义引擎入口与外部协作方接口（不包含实现）
// ==========================================

use crate::domain::diagnosis::{BatchDiagnosis, DiagnosisReport, DuplicateEstimate};
use crate::domain::file::FileDescriptor;
use crate::domain::import::{BatchResult, ImportDecision, ImportOperation};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// DiagnosisService Trait - 诊断协作方
// ==========================================
// 用途: 导入前的文件结构/质量诊断（结构提取、缺失值、
//       行数、类型建议由协作方内部完成）
// 语义: 整批原子——全部报告一起返回,或整体失败;
//       不建模部分诊断结果
#[async_trait]
pub trait DiagnosisService: Send + Sync {
    /// 诊断一批文件,按输入顺序返回每文件一份报告
    ///
    /// # 返回
    /// - Ok(Vec<DiagnosisReport>): 与 files 等长且对位
    /// - Err: 任一文件不可诊断（如不可读）时整批失败
    async fn diagnose(&self, files: &[FileDescriptor]) -> ImportResult<Vec<DiagnosisReport>>;
}

// ==========================================
// DuplicateCounter Trait - 重复计数协作方
// ==========================================
// 用途: 跨文件重复行统计（全量扫描,代价高）
// 红线: 仅在结构兼容且文件数 >= 2 时由引擎调用
#[async_trait]
pub trait DuplicateCounter: Send + Sync {
    /// 统计跨文件重复行
    async fn count_duplicates(&self, files: &[FileDescriptor])
        -> ImportResult<DuplicateEstimate>;
}

// ==========================================
// TableImporter Trait - 表导入协作方
// ==========================================
// 用途: 执行单次导入操作（replace 建表 / append 追加）
// 说明: 超时策略由协作方自行负责,引擎只将失败记为操作失败
#[async_trait]
pub trait TableImporter: Send + Sync {
    /// 执行单次导入操作
    ///
    /// # 返回
    /// - Ok(()): 操作成功
    /// - Err: 操作失败（由执行器捕获进 BatchResult,不上抛）
    async fn import_table(&self, operation: &ImportOperation) -> ImportResult<()>;
}

// ==========================================
// ImportEngine Trait - 导入引擎入口
// ==========================================
// 工作流: 两阶段——先 inspect_batch 诊断供用户决策,
//         再 reconcile_and_import 按决策执行
#[async_trait]
pub trait ImportEngine: Send + Sync {
    /// 阶段 1: 诊断批次（解析 → 诊断 → 兼容性 → 去重预估）
    ///
    /// # 参数
    /// - paths: 用户提供的文件路径列表
    /// - use_cache: 是否复用已缓存的诊断报告
    ///
    /// # 返回
    /// - Ok(BatchDiagnosis): 供 UI 展示并形成 ImportDecision
    /// - Err: 不支持的扩展名 / 诊断整批失败
    async fn inspect_batch<P: AsRef<Path> + Send + Sync>(
        &self,
        paths: &[P],
        use_cache: bool,
    ) -> ImportResult<BatchDiagnosis>;

    /// 阶段 2: 按用户决策协调并执行导入
    ///
    /// # 失败语义
    /// - 批次内单操作失败: 记录在 BatchResult 中,不作为 Err 返回
    /// - 决策违反契约（merge 但文件数不足/结构不兼容）: Err(InvalidDecision)
    /// - 诊断整批失败: Err(DiagnosisFailure)
    ///
    /// # 说明
    /// 调用方始终能区分"请求无效,一个文件都没导入"与
    /// "部分导入成功,部分失败"——UI 据此决定是否保留选择状态重试
    async fn reconcile_and_import<P: AsRef<Path> + Send + Sync>(
        &self,
        paths: &[P],
        decision: &ImportDecision,
    ) -> ImportResult<BatchResult>;
}
