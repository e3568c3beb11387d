//! 并发调度器 - 编排层
//!
//! ## 职责
//!
//! 把一批 `WorkItem` 扇出为并发任务，限制同时进行的远程调用数量，
//! 并按输入顺序收集每个文件的 `Outcome`。
//!
//! ## 核心保证
//!
//! 1. **限流**：任意时刻最多 `concurrency_limit` 个分析调用在进行中
//! 2. **启动保序**：任务按输入顺序获取许可并启动
//! 3. **结果保序**：无论完成顺序如何，`BatchResult` 严格与输入对齐
//! 4. **任务隔离**：单个任务的失败（包括 panic）只影响自己的结果
//! 5. **无重试**：每个文件恰好调用一次 `analyze`，失败原样上报
//!
//! 调度器不做取消，也不强制超时。需要超时的调用方应在 `analyze`
//! 内部自行处理。

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error};

use crate::error::{AnalyzeError, DispatchError};
use crate::models::{BatchResult, Outcome, OutcomeStatus, WorkItem};

/// 单个文件完成时的进度事件（按完成顺序发出）
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// 文件在输入列表中的索引
    pub index: usize,
    /// 文件名
    pub file_name: String,
    /// 该文件的终态
    pub status: OutcomeStatus,
}

/// 运行一批分析任务
///
/// `run_batch_with_progress` 的便捷封装，不上报进度。
pub async fn run_batch<F, Fut>(
    items: Vec<WorkItem>,
    concurrency_limit: usize,
    analyze: F,
) -> Result<BatchResult, DispatchError>
where
    F: Fn(WorkItem) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, AnalyzeError>> + Send + 'static,
{
    run_batch_with_progress(items, concurrency_limit, analyze, None).await
}

/// 运行一批分析任务，并通过可选通道上报每个文件的完成事件
///
/// # 参数
/// - `items`: 待处理的文件列表，处理期间由调度器独占持有
/// - `concurrency_limit`: 最大并发数，必须 >= 1
/// - `analyze`: 单个文件的分析函数，由调用方注入
/// - `progress`: 可选的进度通道，每个文件完成时发送一个事件
///
/// # 返回
/// 与 `items` 按索引对齐的 `BatchResult`。空输入立即返回空结果，
/// 不调用 `analyze`。
pub async fn run_batch_with_progress<F, Fut>(
    items: Vec<WorkItem>,
    concurrency_limit: usize,
    analyze: F,
    progress: Option<mpsc::UnboundedSender<ProgressEvent>>,
) -> Result<BatchResult, DispatchError>
where
    F: Fn(WorkItem) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, AnalyzeError>> + Send + 'static,
{
    if concurrency_limit == 0 {
        return Err(DispatchError::InvalidConcurrencyLimit { limit: 0 });
    }

    if items.is_empty() {
        return Ok(Vec::new());
    }

    let total = items.len();
    debug!("调度 {} 个任务，最大并发 {}", total, concurrency_limit);

    let semaphore = Arc::new(Semaphore::new(concurrency_limit));
    let analyze = Arc::new(analyze);
    let mut handles = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        // 先取许可再创建任务，保证启动顺序跟随输入顺序
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| DispatchError::AdmissionGateClosed)?;

        let analyze = Arc::clone(&analyze);
        let progress = progress.clone();
        let file_name = item.file_name.clone();

        let handle = tokio::spawn(async move {
            let _permit = permit;
            let outcome = Outcome::from_analysis(analyze(item).await);

            if let Some(tx) = progress {
                // 接收端关闭不影响批处理本身
                let _ = tx.send(ProgressEvent {
                    index,
                    file_name,
                    status: outcome.status,
                });
            }

            outcome
        });
        handles.push((index, handle));
    }

    // 按创建顺序等待任务，结果天然与输入对齐
    let mut results = Vec::with_capacity(total);
    for (index, handle) in handles {
        match handle.await {
            Ok(outcome) => results.push(outcome),
            Err(e) => {
                // 任务 panic 只折损自己的结果槽位
                error!("[文件 {}] 任务异常终止: {}", index + 1, e);
                results.push(Outcome::failed("任务异常终止", e.to_string()));
            }
        }
    }

    Ok(results)
}
