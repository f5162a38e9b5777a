// ==========================================
// 数据工作台 - 文件描述符解析器
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 阶段 0: 文件解析
// ==========================================
// 职责: 将用户提供的路径规范化为 FileDescriptor
// 红线: 不读取文件内容（可读性问题由诊断协作方报告）,
//       未知扩展名在进入管道前整批拒绝
// ==========================================

use crate::domain::file::{FileDescriptor, FileType};
use crate::importer::error::{ImportError, ImportResult};
use std::path::Path;

/// 将单个路径解析为规范化文件描述符
///
/// # 规则
/// - 扩展名不区分大小写（"DATA.CSV" 与 "data.csv" 等价）
/// - 无扩展名或不支持的扩展名 → UnsupportedFormat
pub fn resolve_file<P: AsRef<Path>>(path: P) -> ImportResult<FileDescriptor> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let file_type = FileType::from_extension(&ext)
        .ok_or_else(|| ImportError::UnsupportedFormat(path.display().to_string()))?;

    Ok(FileDescriptor {
        path: path.display().to_string(),
        file_type,
    })
}

/// 批量解析路径（原子语义: 任一文件不支持则整批失败）
pub fn resolve_files<P: AsRef<Path>>(paths: &[P]) -> ImportResult<Vec<FileDescriptor>> {
    paths.iter().map(resolve_file).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_csv_and_parquet() {
        let csv = resolve_file("/data/sales_2025.csv").unwrap();
        assert_eq!(csv.file_type, FileType::Csv);
        assert_eq!(csv.file_name(), "sales_2025.csv");

        let parquet = resolve_file("/data/events.parquet").unwrap();
        assert_eq!(parquet.file_type, FileType::Parquet);
    }

    #[test]
    fn test_resolve_extension_case_insensitive() {
        let desc = resolve_file("/data/REPORT.CSV").unwrap();
        assert_eq!(desc.file_type, FileType::Csv);
        // 原始路径保持不变,只有类型派生使用小写
        assert_eq!(desc.path, "/data/REPORT.CSV");
    }

    #[test]
    fn test_resolve_rejects_unknown_extension() {
        assert!(matches!(
            resolve_file("/data/book.xlsx"),
            Err(ImportError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            resolve_file("/data/no_extension"),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_resolve_files_atomic() {
        // 批次中任一文件不支持 → 整批失败
        let result = resolve_files(&["/data/a.csv", "/data/b.xlsx", "/data/c.parquet"]);
        assert!(result.is_err());

        let ok = resolve_files(&["/data/a.csv", "/data/c.parquet"]).unwrap();
        assert_eq!(ok.len(), 2);
    }
}
