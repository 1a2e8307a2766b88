//! 工作项处理流程 - 流程层
//!
//! 核心职责：定义"一个工作项"的完整处理流程
//!
//! 流程顺序：
//! 1. 校验 payload，提取搜索词
//! 2. 开启浏览器会话 → 搜索自动化 → 解析文章 → 写出 CSV
//! 3. 关闭会话（抓取成败或 panic 都执行）
//!
//! 校验失败由流程直接标记终态；抓取途中的错误向上抛，
//! 由编排层统一记为 UNCAUGHT_ERROR。

use std::panic::{resume_unwind, AssertUnwindSafe};
use std::path::PathBuf;

use anyhow::Result;
use futures::FutureExt;
use tracing::{info, warn};

use crate::browser::{BrowserDriver, BrowserSession};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{FailureCode, FailureKind, WorkItem};
use crate::services::{ArticleExtractor, ResultWriter, SearchAutomation};
use crate::workflow::item_ctx::ItemCtx;

/// 工作项处理流程
///
/// 职责：
/// - 编排单个工作项的完整处理流程
/// - 决定何时校验、何时抓取、何时写出
/// - 不持有任何资源（会话由驱动按次发放）
/// - 只依赖业务能力（services）
pub struct ScrapeFlow {
    automation: SearchAutomation,
    extractor: ArticleExtractor,
    writer: ResultWriter,
}

impl ScrapeFlow {
    /// 创建新的工作项处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            automation: SearchAutomation::new(config),
            extractor: ArticleExtractor::new(),
            writer: ResultWriter::new(config),
        }
    }

    pub async fn process(
        &self,
        driver: &dyn BrowserDriver,
        item: &mut WorkItem,
        ctx: &ItemCtx,
    ) -> Result<()> {
        // ========== 阶段 0: 校验工作项 ==========
        let search_term = match item.search_term() {
            Some(term) => term.to_string(),
            None => {
                warn!("{} ⚠️ payload 缺失或没有 search_term 键，标记失败", ctx);
                item.mark_failed(
                    FailureKind::Application,
                    FailureCode::InvalidPayload,
                    "工作项缺少有效 payload 或 search_term 键",
                );
                return Ok(());
            }
        };

        if search_term.is_empty() {
            warn!("{} ⚠️ 搜索词为空，标记失败", ctx);
            item.mark_failed(
                FailureKind::Application,
                FailureCode::MissingSearchTerm,
                "工作项未提供搜索词",
            );
            return Ok(());
        }

        info!("{} 🔍 搜索词: {}", ctx, search_term);

        // ========== 阶段 1: 开启浏览器会话 ==========
        let session = driver.new_session().await.map_err(AppError::from)?;

        // ========== 阶段 2: 抓取并写出 ==========
        // 抓取途中 panic 也不能跳过阶段 3，先兜住再回收会话
        let caught = AssertUnwindSafe(self.scrape_with_session(session.as_ref(), &search_term, ctx))
            .catch_unwind()
            .await;

        // ========== 阶段 3: 关闭会话（抓取成败或 panic 都执行） ==========
        if let Err(e) = session.close_session().await {
            warn!("{} ⚠️ 关闭浏览器会话失败: {}", ctx, e);
        }

        // ========== 阶段 4: 汇报抓取结果 ==========
        let (count, path) = match caught {
            Ok(outcome) => outcome?,
            // 会话已回收，panic 继续向上抛，由编排层统一记账
            Err(panic) => resume_unwind(panic),
        };
        info!(
            "{} ✅ 抓取完成: {} 条记录已写入 {}",
            ctx,
            count,
            path.display()
        );

        Ok(())
    }

    /// 在已开启的会话里完成"搜索 → 解析 → 写出"
    async fn scrape_with_session(
        &self,
        session: &dyn BrowserSession,
        search_term: &str,
        ctx: &ItemCtx,
    ) -> AppResult<(usize, PathBuf)> {
        // 搜索自动化，拿到结果页 HTML
        let html = self.automation.run(session, search_term).await?;

        // 解析文章卡片
        let records = self.extractor.extract(&html, search_term);
        if records.is_empty() {
            warn!("{} ⚠️ 结果页中没有匹配的文章卡片，照常写出表头", ctx);
        } else {
            info!("{} ✓ 解析出 {} 篇文章", ctx, records.len());
        }

        // 写出 CSV
        let path = self.writer.write(search_term, &records)?;

        Ok((records.len(), path))
    }
}
