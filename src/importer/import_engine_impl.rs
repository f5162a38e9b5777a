// ==========================================
// 数据工作台 - 导入引擎实现
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 两阶段导入工作流
// ==========================================
// 职责: 编排解析 → 诊断 → 兼容性 → 去重预估 → 计划 → 执行
// 红线: 批次级失败（无效决策/诊断失败）返回 Err;
//       操作级失败只记入 BatchResult,两者绝不混淆
// ==========================================

use crate::domain::diagnosis::BatchDiagnosis;
use crate::domain::import::{BatchResult, ImportDecision};
use crate::importer::diagnosis_client::DiagnosisClient;
use crate::importer::error::ImportResult;
use crate::importer::import_engine_trait::{
    DiagnosisService, DuplicateCounter, ImportEngine, TableImporter,
};
use crate::importer::{compatibility, duplicate, executor, file_resolver, plan};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

// ==========================================
// EngineOptions - 引擎配置
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineOptions {
    // inspect_batch(use_cache=true) 时是否允许命中诊断缓存
    pub use_diagnosis_cache: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            use_diagnosis_cache: true,
        }
    }
}

// ==========================================
// ImportEngineImpl - 引擎实现
// ==========================================
// 协作方全部 Arc 注入,引擎自身无状态（诊断缓存在客户端内）
pub struct ImportEngineImpl<D, C, T>
where
    D: DiagnosisService,
    C: DuplicateCounter,
    T: TableImporter,
{
    diagnosis: DiagnosisClient<D>,
    duplicate_counter: Arc<C>,
    table_importer: Arc<T>,
    options: EngineOptions,
}

impl<D, C, T> ImportEngineImpl<D, C, T>
where
    D: DiagnosisService,
    C: DuplicateCounter,
    T: TableImporter,
{
    pub fn new(
        diagnosis_service: Arc<D>,
        duplicate_counter: Arc<C>,
        table_importer: Arc<T>,
    ) -> Self {
        Self::with_options(
            diagnosis_service,
            duplicate_counter,
            table_importer,
            EngineOptions::default(),
        )
    }

    pub fn with_options(
        diagnosis_service: Arc<D>,
        duplicate_counter: Arc<C>,
        table_importer: Arc<T>,
        options: EngineOptions,
    ) -> Self {
        Self {
            diagnosis: DiagnosisClient::new(diagnosis_service),
            duplicate_counter,
            table_importer,
            options,
        }
    }
}

#[async_trait]
impl<D, C, T> ImportEngine for ImportEngineImpl<D, C, T>
where
    D: DiagnosisService,
    C: DuplicateCounter,
    T: TableImporter,
{
    #[instrument(skip(self, paths), fields(file_count = paths.len()))]
    async fn inspect_batch<P: AsRef<Path> + Send + Sync>(
        &self,
        paths: &[P],
        use_cache: bool,
    ) -> ImportResult<BatchDiagnosis> {
        let files = file_resolver::resolve_files(paths)?;
        let use_cache = use_cache && self.options.use_diagnosis_cache;
        let reports = self.diagnosis.diagnose_batch(&files, use_cache).await?;

        let compatible = compatibility::is_compatible(&reports);
        let estimate = duplicate::estimate_duplicates(
            self.duplicate_counter.as_ref(),
            &files,
            &reports,
            compatible,
        )
        .await?;

        info!(
            file_count = files.len(),
            compatible,
            estimated_rows = estimate.estimated_rows,
            "批次诊断阶段完成"
        );

        Ok(BatchDiagnosis {
            files,
            reports,
            compatible,
            duplicate_estimate: estimate,
        })
    }

    #[instrument(skip(self, paths, decision), fields(file_count = paths.len(), merge = decision.merge))]
    async fn reconcile_and_import<P: AsRef<Path> + Send + Sync>(
        &self,
        paths: &[P],
        decision: &ImportDecision,
    ) -> ImportResult<BatchResult> {
        let files = file_resolver::resolve_files(paths)?;
        // 协调阶段总是复用缓存报告（阶段 1 刚诊断过的文件不再扫描）
        let reports = self
            .diagnosis
            .diagnose_batch(&files, self.options.use_diagnosis_cache)
            .await?;

        let compatible = compatibility::is_compatible(&reports);

        // 去重预估只对合并导入有意义,独立导入不附带
        let estimate = if decision.merge {
            Some(
                duplicate::estimate_duplicates(
                    self.duplicate_counter.as_ref(),
                    &files,
                    &reports,
                    compatible,
                )
                .await?,
            )
        } else {
            None
        };

        let plan = plan::build_plan(&files, decision, compatible)?;

        let mut result = executor::execute_plan(self.table_importer.as_ref(), &plan).await;
        result.duplicate_estimate = estimate;

        Ok(result)
    }
}
