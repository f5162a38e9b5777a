// ==========================================
// 数据工作台 - 结构兼容性评估器
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 合并前兼容性裁定
// ==========================================
// 职责: 纯函数比较 N 份诊断报告,裁定是否可合并
// 红线: 按列位置比较（非集合比较）——追加导入要求
//       行级 UNION 语义,列顺序必须一致,此为设计决策
// ==========================================

use crate::domain::diagnosis::{CompatibilityVerdict, DiagnosisReport};

/// 评估报告集合的结构兼容性
///
/// # 规则（任一不满足即短路为不兼容）
/// 1. 报告数 >= 2（单文件谈不上合并）
/// 2. 所有报告文件类型一致
/// 3. 所有报告列数一致
/// 4. 每个列位置: 列名不区分大小写相等,类型精确相等
pub fn evaluate(reports: &[DiagnosisReport]) -> CompatibilityVerdict {
    CompatibilityVerdict {
        compatible: is_compatible(reports),
    }
}

/// 兼容性裁定（布尔形式）
pub fn is_compatible(reports: &[DiagnosisReport]) -> bool {
    if reports.len() < 2 {
        return false;
    }

    let reference = &reports[0];
    for report in &reports[1..] {
        if report.file_type != reference.file_type {
            return false;
        }
        if report.schema.len() != reference.schema.len() {
            return false;
        }
        for (ref_col, col) in reference.schema.iter().zip(report.schema.iter()) {
            if ref_col.name.to_lowercase() != col.name.to_lowercase() {
                return false;
            }
            if ref_col.data_type != col.data_type {
                return false;
            }
        }
    }

    true
}
