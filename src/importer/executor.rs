// ==========================================
// 数据工作台 - 导入计划执行器
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 阶段 3: 顺序执行
// ==========================================
// 职责: 严格按 order_index 顺序执行计划,逐操作记账
// 失败语义:
//   - 合并基表（操作 0）失败: 立即终止,结果仅含 1 条记录
//   - 合并追加失败: 记录后继续执行后续追加
//   - 独立操作失败: 记录后继续,所有操作都会被尝试
// 红线: 操作级失败进 BatchResult,绝不上抛中断批次
// ==========================================

use crate::domain::import::{BatchResult, ImportPlan};
use crate::importer::import_engine_trait::TableImporter;
use std::time::Instant;
use tracing::{info, warn};

/// 顺序执行导入计划,返回逐操作结果
pub async fn execute_plan<T: TableImporter + ?Sized>(
    importer: &T,
    plan: &ImportPlan,
) -> BatchResult {
    let started = Instant::now();
    let mut result = BatchResult::new();

    for operation in &plan.operations {
        info!(
            order_index = operation.order_index,
            source = %operation.source.path,
            target_table = %operation.target_table,
            mode = ?operation.mode,
            "执行导入操作"
        );

        match importer.import_table(operation).await {
            Ok(()) => {
                result.record_success(operation.clone());
            }
            Err(e) => {
                warn!(
                    order_index = operation.order_index,
                    target_table = %operation.target_table,
                    error = %e,
                    "导入操作失败"
                );
                result.record_failure(operation.clone(), e.to_string());

                // 合并基表失败 → 追加无目标表可依附,整体终止
                if plan.merged && operation.order_index == 0 {
                    warn!(
                        target_table = %operation.target_table,
                        "合并基表建表失败,终止后续追加"
                    );
                    break;
                }
            }
        }
    }

    result.elapsed_ms = started.elapsed().as_millis() as u64;

    info!(
        batch_id = %result.batch_id,
        success_count = result.success_count,
        fail_count = result.fail_count,
        elapsed_ms = result.elapsed_ms,
        "批次执行完成"
    );

    result
}
