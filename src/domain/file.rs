// ==========================================
// 数据工作台 - 文件描述符
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 文件类型规范
// 依据: data_model_v0.1.md - file_descriptor 定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// FileType - 支持的文件类型
// ==========================================
// 红线: 仅支持 CSV/Parquet,其他扩展名在进入管道前拒绝
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Parquet,
}

impl FileType {
    /// 根据扩展名（不含点号，已小写）识别文件类型
    ///
    /// # 返回
    /// - Some(FileType): 识别成功
    /// - None: 不支持的扩展名
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "csv" => Some(FileType::Csv),
            "parquet" => Some(FileType::Parquet),
            _ => None,
        }
    }

    /// 文件类型对应的扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Parquet => "parquet",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ==========================================
// FileDescriptor - 规范化文件描述符
// ==========================================
// 用途: 解析层输出,诊断/计划/执行阶段只读
// 生命周期: 批次内创建,批次结束后丢弃
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub path: String,        // 源文件路径（用户提供的原始路径）
    pub file_type: FileType, // 声明类型（由扩展名确定性派生）
}

impl FileDescriptor {
    /// 源文件的文件名部分（不含目录）
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.path.as_str())
    }
}
