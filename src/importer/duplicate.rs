// ==========================================
// 数据工作台 - 跨文件重复行估算
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 合并前去重预估
// ==========================================
// 职责: 决定何时调用重复计数协作方,何时本地合成跳过估算
// 红线: 不兼容或文件数不足时绝不触发协作方
//       （避免不必要的全量数据扫描）
// ==========================================

use crate::domain::diagnosis::{DiagnosisReport, DuplicateEstimate};
use crate::domain::file::FileDescriptor;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::import_engine_trait::DuplicateCounter;
use tracing::debug;

/// 估算跨文件重复行
///
/// # 规则
/// - compatible 且文件数 >= 2: 委托重复计数协作方（全量扫描）
/// - 其他情况: 本地合成 skipped=true,estimated_rows = Σ row_count
pub async fn estimate_duplicates<C: DuplicateCounter + ?Sized>(
    counter: &C,
    files: &[FileDescriptor],
    reports: &[DiagnosisReport],
    compatible: bool,
) -> ImportResult<DuplicateEstimate> {
    if !compatible || files.len() < 2 {
        debug!(
            file_count = files.len(),
            compatible, "跳过重复行计数,本地合成估算"
        );
        return Ok(DuplicateEstimate::skipped_from_reports(reports));
    }

    let estimate = counter.count_duplicates(files).await.map_err(|e| match e {
        err @ ImportError::DuplicateCountFailure(_) => err,
        other => ImportError::DuplicateCountFailure(other.to_string()),
    })?;
    debug!(
        total_rows = estimate.total_rows,
        duplicate_rows = estimate.duplicate_rows,
        estimated_rows = estimate.estimated_rows,
        "重复行计数完成"
    );
    Ok(estimate)
}
