//! 抓取流水线 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责流水线的组装和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：准备输出目录、启动无头浏览器、组装处理流程
//! 2. **清单加载**：读取工作项清单（`Vec<WorkItem>`）
//! 3. **向下委托**：委托 item_runner 驱动全部工作项
//! 4. **资源管理**：唯一持有 ChromeDriver，退出前负责回收
//! 5. **全局统计**：汇总所有工作项的终态并输出

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::browser::{BrowserDriver, ChromeDriver};
use crate::config::{Config, ExecutionMode};
use crate::models::{load_work_items, ItemStatus, WorkItem};
use crate::orchestrator::item_runner::run_work_items;
use crate::services::ResultWriter;
use crate::workflow::ScrapeFlow;

/// 应用主结构
pub struct App {
    config: Config,
    driver: Arc<ChromeDriver>,
    flow: Arc<ScrapeFlow>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        // 输出目录先准备好，建不出来就没必要启动浏览器
        ResultWriter::new(&config).ensure_output_dir()?;

        // 启动无头浏览器（全程只有这一个实例）
        let driver = Arc::new(ChromeDriver::launch(&config).await?);

        let flow = Arc::new(ScrapeFlow::new(&config));

        Ok(Self {
            config,
            driver,
            flow,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(self) -> Result<()> {
        let result = self.run_inner().await;

        // 无论成败都回收浏览器进程
        self.driver.shutdown().await;

        result
    }

    async fn run_inner(&self) -> Result<()> {
        // 加载所有待处理的工作项
        let items = self.load_items().await?;

        if items.is_empty() {
            warn!("⚠️ 工作项清单为空，程序结束");
            return Ok(());
        }

        let total_items = items.len();
        log_items_loaded(
            total_items,
            self.config.execution_mode,
            self.config.max_concurrent_items,
        );

        // 驱动全部工作项
        let driver: Arc<dyn BrowserDriver> = self.driver.clone();
        let finished = run_work_items(
            self.flow.clone(),
            driver,
            items,
            self.config.execution_mode,
            self.config.max_concurrent_items,
        )
        .await?;

        // 输出最终统计
        let stats = RunStats::from_items(&finished);
        log_failed_items(&finished);
        print_final_stats(&stats);

        Ok(())
    }

    /// 加载工作项
    async fn load_items(&self) -> Result<Vec<WorkItem>> {
        info!("\n📁 正在加载工作项清单...");
        load_work_items(&self.config.work_items_file).await
    }
}

/// 处理统计
#[derive(Debug, Default)]
pub struct RunStats {
    pub done: usize,
    pub failed: usize,
    pub total: usize,
}

impl RunStats {
    /// 汇总处理完的工作项终态
    pub fn from_items(items: &[WorkItem]) -> Self {
        let done = items
            .iter()
            .filter(|item| matches!(item.status(), ItemStatus::Done))
            .count();
        let failed = items
            .iter()
            .filter(|item| matches!(item.status(), ItemStatus::Failed { .. }))
            .count();

        Self {
            done,
            failed,
            total: items.len(),
        }
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Gothamist 新闻搜索抓取");
    info!("🌐 目标站点: {}", config.target_url);
    info!(
        "📊 执行模式: {:?} / 最大并发 {}",
        config.execution_mode, config.max_concurrent_items
    );
    info!("{}", "=".repeat(60));
}

fn log_items_loaded(total: usize, mode: ExecutionMode, max_concurrent: usize) {
    info!("✓ 共加载 {} 个工作项", total);
    match mode {
        ExecutionMode::Sequential => info!("📋 将按顺序逐个处理\n"),
        ExecutionMode::Concurrent => {
            info!("📋 将以每批 {} 个的方式并发处理", max_concurrent);
            info!("💡 每批完成后再开始下一批\n");
        }
    }
}

fn log_failed_items(items: &[WorkItem]) {
    for item in items {
        if let ItemStatus::Failed {
            kind,
            code,
            message,
        } = item.status()
        {
            warn!(
                "[任务 {}] ❌ 终态: failed ({}/{}) - {}",
                item.id,
                kind.as_str(),
                code.as_str(),
                message
            );
        }
    }
}

fn print_final_stats(stats: &RunStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.done, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
}
