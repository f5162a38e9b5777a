// ==========================================
// 数据工作台 - 导入计划构建器
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 阶段 2: 计划构建
// ==========================================
// 职责: 将用户决策翻译为有序导入操作序列
// 红线: merge 前置条件不满足时显式失败,
//       绝不静默降级为独立导入;
//       独立导入强制 deduplicate=false
// ==========================================

use crate::domain::file::FileDescriptor;
use crate::domain::import::{ImportDecision, ImportMode, ImportOperation, ImportPlan};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::naming;
use std::collections::HashSet;
use tracing::debug;

/// 构建批次导入计划
///
/// # 参数
/// - files: 规范化文件描述符（确定性顺序）
/// - decision: 用户决策（merge/deduplicate/表名覆盖）
/// - compatible: 调用方已验证的兼容性裁定
///
/// # 两个互斥分支
/// - 合并导入: 操作 0 建表（replace+overwrite）,
///   操作 1..N-1 追加同一张表,去重跟随决策
/// - 独立导入: 每文件一个 replace 操作,表名批次内唯一
pub fn build_plan(
    files: &[FileDescriptor],
    decision: &ImportDecision,
    compatible: bool,
) -> ImportResult<ImportPlan> {
    if files.is_empty() {
        return Err(ImportError::InvalidDecision(
            "批次中没有任何文件".to_string(),
        ));
    }

    if decision.merge {
        build_merged_plan(files, decision, compatible)
    } else {
        build_independent_plan(files, decision)
    }
}

/// 合并导入分支
///
/// # 前置条件（违反即契约错误,非执行失败）
/// - 文件数 >= 2
/// - 结构兼容性已验证为 true
fn build_merged_plan(
    files: &[FileDescriptor],
    decision: &ImportDecision,
    compatible: bool,
) -> ImportResult<ImportPlan> {
    if files.len() < 2 {
        return Err(ImportError::InvalidDecision(format!(
            "合并导入要求至少 2 个文件,实际 {}",
            files.len()
        )));
    }
    if !compatible {
        return Err(ImportError::InvalidDecision(
            "合并导入要求结构兼容的文件集合".to_string(),
        ));
    }

    // 合并目标表名: 首文件覆盖名优先,否则由首文件名派生
    let mut used = HashSet::new();
    let target_table = match decision.table_names.get(&0) {
        Some(name) => name.clone(),
        None => naming::allocate_unique(files[0].file_name(), &mut used),
    };

    let operations = files
        .iter()
        .enumerate()
        .map(|(idx, file)| {
            if idx == 0 {
                // 首文件建表: 合并的基表
                ImportOperation {
                    source: file.clone(),
                    target_table: target_table.clone(),
                    mode: ImportMode::Replace,
                    overwrite: true,
                    deduplicate: false,
                    order_index: idx,
                }
            } else {
                ImportOperation {
                    source: file.clone(),
                    target_table: target_table.clone(),
                    mode: ImportMode::Append,
                    overwrite: false,
                    deduplicate: decision.deduplicate,
                    order_index: idx,
                }
            }
        })
        .collect();

    debug!(
        target_table = %target_table,
        file_count = files.len(),
        deduplicate = decision.deduplicate,
        "合并导入计划构建完成"
    );

    Ok(ImportPlan {
        operations,
        merged: true,
    })
}

/// 独立导入分支（每文件一表）
///
/// # 表名规则
/// - 覆盖名预先占入共享已用名集合（覆盖名与派生名绝不相撞）
/// - 派生名经 allocate_unique 按文件顺序串行分配
/// - deduplicate 强制为 false,即使决策传入 true
fn build_independent_plan(
    files: &[FileDescriptor],
    decision: &ImportDecision,
) -> ImportResult<ImportPlan> {
    let mut used: HashSet<String> = decision.table_names.values().cloned().collect();

    let operations = files
        .iter()
        .enumerate()
        .map(|(idx, file)| {
            let target_table = match decision.table_names.get(&idx) {
                Some(name) => name.clone(),
                None => naming::allocate_unique(file.file_name(), &mut used),
            };
            ImportOperation {
                source: file.clone(),
                target_table,
                mode: ImportMode::Replace,
                overwrite: true,
                deduplicate: false,
                order_index: idx,
            }
        })
        .collect();

    debug!(file_count = files.len(), "独立导入计划构建完成");

    Ok(ImportPlan {
        operations,
        merged: false,
    })
}
