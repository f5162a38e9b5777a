// ==========================================
// 数据工作台 - 表名分配器
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 表名派生与唯一性
// ==========================================
// 职责: 从文件名派生合法表标识符,并保证批次内唯一
// 红线: allocate_unique 有状态且顺序相关,
//       必须按确定性文件顺序串行调用（禁止并行分配）
// ==========================================

use std::collections::HashSet;

// 保守的标识符长度上限
const MAX_IDENTIFIER_LEN: usize = 63;

// 规范化后为空时的兜底名
const FALLBACK_NAME: &str = "dataset";

/// 从文件名派生候选表名（纯函数,确定性）
///
/// # 规则
/// 1. 去掉已识别的扩展名（.csv/.parquet,不区分大小写）
/// 2. 转小写
/// 3. 连续非字母数字字符折叠为单个下划线
/// 4. 去掉首尾下划线
/// 5. 数字开头时前置下划线（标识符安全）
/// 6. 截断到 63 字符
/// 7. 结果为空时兜底为 "dataset"
pub fn allocate(filename: &str) -> String {
    let stem = strip_recognized_extension(filename);

    let mut name = String::with_capacity(stem.len());
    let mut last_was_underscore = false;
    for ch in stem.chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                name.push(lower);
            }
            last_was_underscore = false;
        } else if !last_was_underscore {
            name.push('_');
            last_was_underscore = true;
        }
    }

    let mut name = name.trim_matches('_').to_string();

    if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    // 按字符截断（列名可能包含多字节字符,不能按字节切）
    if name.chars().count() > MAX_IDENTIFIER_LEN {
        name = name.chars().take(MAX_IDENTIFIER_LEN).collect();
    }

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// 派生批次内唯一表名（有状态,顺序相关）
///
/// # 参数
/// - filename: 源文件名
/// - used: 批次共享的已用名集合（显式累加器,贯穿有序遍历）
///
/// # 规则
/// - 候选名已占用时依次尝试 `_1`, `_2`, … 后缀
/// - 选定名在返回前插入 used
pub fn allocate_unique(filename: &str, used: &mut HashSet<String>) -> String {
    let base = allocate(filename);

    let mut candidate = base.clone();
    let mut suffix = 0usize;
    while used.contains(&candidate) {
        suffix += 1;
        candidate = format!("{base}_{suffix}");
    }

    used.insert(candidate.clone());
    candidate
}

/// 去掉已识别的扩展名;未识别的扩展名保留（参与规范化）
fn strip_recognized_extension(filename: &str) -> &str {
    let lower = filename.to_lowercase();
    for ext in [".csv", ".parquet"] {
        if lower.ends_with(ext) {
            return &filename[..filename.len() - ext.len()];
        }
    }
    filename
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_normalizes_filename() {
        assert_eq!(allocate("Sales Jan.csv"), "sales_jan");
        assert_eq!(allocate("2025 Q1 报表.parquet"), "_2025_q1_报表");
        assert_eq!(allocate("orders--final (2).CSV"), "orders_final_2");
    }

    #[test]
    fn test_allocate_strips_only_recognized_extension() {
        // 未识别的扩展名不剥离,作为名字的一部分规范化
        assert_eq!(allocate("dump.json"), "dump_json");
        assert_eq!(allocate("events.Parquet"), "events");
    }

    #[test]
    fn test_allocate_symbol_only_filename_falls_back() {
        // 纯符号文件名规范化后为空 → 兜底名,绝不产生空标识符
        assert_eq!(allocate("???.csv"), "dataset");
        assert_eq!(allocate("___.csv"), "dataset");
    }

    #[test]
    fn test_allocate_truncates_long_names() {
        let long = format!("{}.csv", "a".repeat(100));
        assert_eq!(allocate(&long).chars().count(), 63);
    }

    #[test]
    fn test_allocate_unique_suffixes_collisions() {
        let mut used = HashSet::new();
        let first = allocate_unique("Sales Jan.csv", &mut used);
        let second = allocate_unique("Sales Jan.csv", &mut used);
        let third = allocate_unique("Sales Jan.csv", &mut used);

        assert_eq!(first, "sales_jan");
        assert_eq!(second, "sales_jan_1");
        assert_eq!(third, "sales_jan_2");
        assert_eq!(used.len(), 3);
    }

    #[test]
    fn test_allocate_unique_cross_type_collision() {
        // 同名不同类型的文件在同一批次内不得撞名
        let mut used = HashSet::new();
        let a = allocate_unique("invoice.csv", &mut used);
        let b = allocate_unique("invoice.parquet", &mut used);
        assert_ne!(a, b);
    }

    #[test]
    fn test_allocate_unique_symbol_only_is_nonempty() {
        let mut used = HashSet::new();
        let name = allocate_unique("???.csv", &mut used);
        assert_eq!(name, "dataset");
        let again = allocate_unique("!!!.csv", &mut used);
        assert_eq!(again, "dataset_1");
    }
}
