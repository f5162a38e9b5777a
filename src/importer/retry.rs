// ==========================================
// 数据工作台 - 瞬时失败重试装饰器
// ==========================================
// 依据: Workbench_Import_Spec_v0.2.md - 协作方瞬时失败处理
// ==========================================
// 职责: 包装协作方调用,按退避时间表重试瞬时失败
// 说明: 与执行器的部分失败语义刻意分离——执行器记账不重试,
//       需要重试的协作方在注入引擎前用本装饰器包装
// ==========================================

use crate::importer::error::ImportResult;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// 按退避时间表重试异步操作
///
/// # 参数
/// - max_attempts: 总尝试次数（含首次,>= 1）
/// - backoff: 第 i 次失败后的等待时间;表短于重试次数时复用末项
/// - op: 每次尝试构造一个新 Future 的闭包
///
/// # 返回
/// - 任一次尝试成功即返回 Ok
/// - 全部尝试耗尽后返回最后一次的 Err
pub async fn with_retry<T, F, Fut>(
    max_attempts: usize,
    backoff: &[Duration],
    mut op: F,
) -> ImportResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ImportResult<T>>,
{
    let attempts = max_attempts.max(1);

    let mut last_err = None;
    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!(attempt, max_attempts = attempts, error = %e, "尝试失败");
                last_err = Some(e);

                if attempt < attempts {
                    let delay = backoff
                        .get(attempt - 1)
                        .or_else(|| backoff.last())
                        .copied()
                        .unwrap_or(Duration::ZERO);
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                }
            }
        }
    }

    // attempts >= 1 保证 last_err 必有值
    Err(last_err.unwrap_or_else(|| {
        crate::importer::error::ImportError::InternalError("重试循环未执行".to_string())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let calls = AtomicUsize::new(0);
        let result: ImportResult<i32> = with_retry(3, &[], || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicUsize::new(0);
        let result: ImportResult<&str> = with_retry(3, &[Duration::ZERO], || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(ImportError::DiagnosisFailure("瞬时失败".to_string()))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_stops_after_max_attempts() {
        let calls = AtomicUsize::new(0);
        let result: ImportResult<()> = with_retry(3, &[Duration::ZERO], || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ImportError::DiagnosisFailure("持续失败".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(ImportError::DiagnosisFailure(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_attempts_clamped_to_one() {
        let calls = AtomicUsize::new(0);
        let result: ImportResult<i32> = with_retry(0, &[], || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(7) }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
