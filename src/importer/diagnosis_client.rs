// ==========================================
// 数据工作台 - 诊断客户端
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 阶段 1: 批次诊断
// ==========================================
// 职责: 封装诊断协作方调用,提供可选的进程内报告缓存
// 说明: 缓存按文件路径键控;重新诊断整份替换缓存报告,
//       报告本身绝不原地修改
// ==========================================

use crate::domain::diagnosis::DiagnosisReport;
use crate::domain::file::FileDescriptor;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::import_engine_trait::DiagnosisService;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

// ==========================================
// DiagnosisClient - 诊断协作方封装
// ==========================================
pub struct DiagnosisClient<D: DiagnosisService> {
    service: Arc<D>,
    // 路径 → 最近一次诊断报告
    cache: Mutex<HashMap<String, DiagnosisReport>>,
}

impl<D: DiagnosisService> DiagnosisClient<D> {
    pub fn new(service: Arc<D>) -> Self {
        Self {
            service,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// 诊断一批文件,按输入顺序返回报告
    ///
    /// # 参数
    /// - files: 规范化文件描述符列表
    /// - use_cache: true 时命中缓存的文件不再请求协作方
    ///
    /// # 语义
    /// - 协作方调用整批原子: 未命中部分一次性提交,失败则整批失败
    /// - 新报告无条件写入缓存（供后续 use_cache 批次复用）
    pub async fn diagnose_batch(
        &self,
        files: &[FileDescriptor],
        use_cache: bool,
    ) -> ImportResult<Vec<DiagnosisReport>> {
        let mut ordered: Vec<Option<DiagnosisReport>> = vec![None; files.len()];
        let mut misses: Vec<(usize, FileDescriptor)> = Vec::new();

        if use_cache {
            let cache = self
                .cache
                .lock()
                .map_err(|_| ImportError::InternalError("诊断缓存锁中毒".to_string()))?;
            for (idx, file) in files.iter().enumerate() {
                match cache.get(&file.path) {
                    Some(report) => ordered[idx] = Some(report.clone()),
                    None => misses.push((idx, file.clone())),
                }
            }
            debug!(
                hits = files.len() - misses.len(),
                misses = misses.len(),
                "诊断缓存查询完成"
            );
        } else {
            misses = files.iter().cloned().enumerate().collect();
        }

        if !misses.is_empty() {
            let miss_files: Vec<FileDescriptor> =
                misses.iter().map(|(_, f)| f.clone()).collect();
            let reports = self
                .service
                .diagnose(&miss_files)
                .await
                .map_err(|e| match e {
                    err @ ImportError::DiagnosisFailure(_) => err,
                    other => ImportError::DiagnosisFailure(other.to_string()),
                })?;

            if reports.len() != miss_files.len() {
                return Err(ImportError::InternalError(format!(
                    "诊断协作方返回报告数不符: 期望 {}, 实际 {}",
                    miss_files.len(),
                    reports.len()
                )));
            }

            let mut cache = self
                .cache
                .lock()
                .map_err(|_| ImportError::InternalError("诊断缓存锁中毒".to_string()))?;
            for ((idx, file), report) in misses.into_iter().zip(reports.into_iter()) {
                cache.insert(file.path.clone(), report.clone());
                ordered[idx] = Some(report);
            }
        }

        info!(file_count = files.len(), use_cache, "批次诊断完成");

        // 所有槽位此时必已填充
        ordered
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ImportError::InternalError("诊断报告装配不完整".to_string()))
    }

    /// 失效单个文件的缓存报告
    pub fn invalidate(&self, path: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.remove(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnosis::ColumnSchema;
    use crate::domain::file::FileType;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingService {
        calls: AtomicUsize,
    }

    impl CountingService {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DiagnosisService for CountingService {
        async fn diagnose(&self, files: &[FileDescriptor]) -> ImportResult<Vec<DiagnosisReport>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(files
                .iter()
                .map(|f| DiagnosisReport {
                    file_path: f.path.clone(),
                    file_type: f.file_type,
                    schema: vec![ColumnSchema::new("id", "BIGINT")],
                    missing_values: BTreeMap::new(),
                    row_count: 10,
                    file_size_bytes: 256,
                    type_suggestions: vec![],
                    diagnosed_at: Utc::now(),
                })
                .collect())
        }
    }

    fn csv(path: &str) -> FileDescriptor {
        FileDescriptor {
            path: path.to_string(),
            file_type: FileType::Csv,
        }
    }

    #[tokio::test]
    async fn test_cache_hit_skips_service() {
        let service = Arc::new(CountingService::new());
        let client = DiagnosisClient::new(service.clone());
        let files = vec![csv("/data/a.csv"), csv("/data/b.csv")];

        client.diagnose_batch(&files, true).await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);

        // 全部命中,协作方不再被调用
        let reports = client.diagnose_batch(&files, true).await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].file_path, "/data/a.csv");
    }

    #[tokio::test]
    async fn test_invalidate_forces_rediagnosis() {
        let service = Arc::new(CountingService::new());
        let client = DiagnosisClient::new(service.clone());
        let files = vec![csv("/data/a.csv"), csv("/data/b.csv")];

        client.diagnose_batch(&files, true).await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);

        // 失效单个路径: 下一批次只为该文件回源
        client.invalidate("/data/a.csv");
        client.diagnose_batch(&files, true).await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);

        // 回源结果重新入缓存,再次全命中
        client.diagnose_batch(&files, true).await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }
}
