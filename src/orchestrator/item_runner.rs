//! 工作项执行器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责驱动一批工作项走完各自的处理流程，是任务级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **模式分发**：按配置选择串行或并发执行
//! 2. **并发控制**：使用 Semaphore 限制同时处理的工作项数量
//! 3. **分批处理**：并发模式下分批执行，每批完成后再开始下一批
//! 4. **失败隔离**：单个工作项出错或 panic 不影响其他工作项
//! 5. **终态兜底**：流程返回后没有终态的工作项统一补报

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Result;
use futures::FutureExt;
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::browser::BrowserDriver;
use crate::config::ExecutionMode;
use crate::models::{FailureCode, FailureKind, ItemStatus, WorkItem};
use crate::workflow::{ItemCtx, ScrapeFlow};

/// 驱动全部工作项完成处理，返回带终态的工作项列表
///
/// 返回列表与输入一一对应（按加载顺序），每一项都已上报过终态
pub async fn run_work_items(
    flow: Arc<ScrapeFlow>,
    driver: Arc<dyn BrowserDriver>,
    items: Vec<WorkItem>,
    mode: ExecutionMode,
    max_concurrent: usize,
) -> Result<Vec<WorkItem>> {
    match mode {
        ExecutionMode::Sequential => Ok(run_sequential(flow, driver, items).await),
        ExecutionMode::Concurrent => run_concurrent(flow, driver, items, max_concurrent).await,
    }
}

/// 串行执行：逐个处理，前一个结束才开始下一个
async fn run_sequential(
    flow: Arc<ScrapeFlow>,
    driver: Arc<dyn BrowserDriver>,
    items: Vec<WorkItem>,
) -> Vec<WorkItem> {
    let mut finished = Vec::with_capacity(items.len());

    for item in items {
        let item = process_item_guarded(flow.clone(), driver.clone(), item).await;
        finished.push(item);
    }

    finished
}

/// 并发执行：分批 spawn，Semaphore 控制同时在跑的数量
async fn run_concurrent(
    flow: Arc<ScrapeFlow>,
    driver: Arc<dyn BrowserDriver>,
    items: Vec<WorkItem>,
    max_concurrent: usize,
) -> Result<Vec<WorkItem>> {
    // 并发数最低为 1，否则 step_by 会 panic
    let max_concurrent = max_concurrent.max(1);

    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let total_items = items.len();
    let total_batches = (total_items + max_concurrent - 1) / max_concurrent;

    let mut item_iter = items.into_iter();
    let mut finished = Vec::with_capacity(total_items);

    // 分批处理
    for batch_start in (0..total_items).step_by(max_concurrent) {
        let batch_end = (batch_start + max_concurrent).min(total_items);
        let batch: Vec<WorkItem> = item_iter.by_ref().take(batch_end - batch_start).collect();
        let batch_num = (batch_start / max_concurrent) + 1;

        log_batch_start(
            batch_num,
            total_batches,
            batch_start + 1,
            batch_end,
            total_items,
        );

        // 为本批创建并发任务
        let mut batch_handles = Vec::new();

        for item in batch {
            let item_id = item.id;
            let permit = semaphore.clone().acquire_owned().await?;

            let flow = flow.clone();
            let driver = driver.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                process_item_guarded(flow, driver, item).await
            });
            batch_handles.push((item_id, handle));
        }

        // 等待本批所有任务完成
        let mut batch_done = 0usize;
        let mut batch_failed = 0usize;

        for (item_id, handle) in batch_handles {
            let item = match handle.await {
                Ok(item) => item,
                Err(e) => {
                    // 任务被取消等极端情况：原工作项已随任务丢失，
                    // 补一个同序号的失败终态占位，保证列表完整
                    error!("[任务 {}] ❌ 任务执行失败: {}", item_id, e);
                    let mut placeholder = WorkItem::new(item_id, None);
                    placeholder.mark_failed(
                        FailureKind::Application,
                        FailureCode::UncaughtError,
                        format!("任务执行失败: {}", e),
                    );
                    placeholder
                }
            };

            if matches!(item.status(), ItemStatus::Done) {
                batch_done += 1;
            } else {
                batch_failed += 1;
            }
            finished.push(item);
        }

        log_batch_complete(batch_num, batch_done, batch_failed);
    }

    Ok(finished)
}

/// 处理单个工作项，保证返回时一定带终态
///
/// 流程中的错误和 panic 都在这里收口：
/// - 流程返回错误 → 记 UNCAUGHT_ERROR 失败
/// - 流程 panic → 提取 panic 信息，记 UNCAUGHT_ERROR 失败
/// - 流程正常返回但未上报终态 → 补报成功
async fn process_item_guarded(
    flow: Arc<ScrapeFlow>,
    driver: Arc<dyn BrowserDriver>,
    mut item: WorkItem,
) -> WorkItem {
    let ctx = ItemCtx::new(item.id);

    let fut = flow.process(driver.as_ref(), &mut item, &ctx);
    let outcome = AssertUnwindSafe(fut).catch_unwind().await;

    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            error!("{} ❌ 处理过程中发生错误: {}", ctx, e);
            if !item.is_reported() {
                item.mark_failed(
                    FailureKind::Application,
                    FailureCode::UncaughtError,
                    e.to_string(),
                );
            }
        }
        Err(panic) => {
            let message = panic_message(panic);
            error!("{} ❌ 处理过程发生 panic: {}", ctx, message);
            if !item.is_reported() {
                item.mark_failed(
                    FailureKind::Application,
                    FailureCode::UncaughtError,
                    message,
                );
            }
        }
    }

    // 兜底：流程正常返回但没有上报终态时按成功处理
    if !item.is_reported() {
        item.mark_done();
    }

    item
}

/// 从 panic 负载里提取可读信息
fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "未知 panic".to_string()
    }
}

// ========== 日志辅助函数 ==========

fn log_batch_start(batch_num: usize, total_batches: usize, start: usize, end: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批任务: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

fn log_batch_complete(batch_num: usize, done: usize, failed: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 批完成: 成功 {}/{}", batch_num, done, done + failed);
    info!("{}", "─".repeat(60));
}
