//! 搜索自动化服务 - 业务能力层
//!
//! 在一次浏览器会话中完成固定的四个阶段：
//! 导航 → 展开搜索框 → 提交搜索词 → 捕获结果页 HTML
//!
//! 每个阶段之后是固定时长的等待（站点渲染较慢，刻意不做轮询）；
//! 目标元素不存在时返回明确的 ElementNotFound，而不是静默跳过

use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::browser::driver::BrowserSession;
use crate::config::Config;
use crate::error::AutomationError;

/// 首页上展开搜索框的按钮
pub const SEARCH_BUTTON_SELECTOR: &str = r#"button[aria-label="Go to search page"]"#;
/// 搜索词输入框
pub const SEARCH_INPUT_SELECTOR: &str = r#"input[name="q"]"#;
/// 搜索提交按钮
pub const SUBMIT_BUTTON_SELECTOR: &str = "button.search-page-button";

/// 展开搜索框阶段名（用于错误信息）
const STAGE_REVEAL_SEARCH: &str = "reveal-search";
/// 提交搜索词阶段名（用于错误信息）
const STAGE_SUBMIT_QUERY: &str = "submit-query";

/// 搜索自动化服务
///
/// 职责：
/// - 驱动一次会话完成站内搜索并返回结果页 HTML
/// - 只依赖 `BrowserSession` 能力接口
/// - 不出现 Vec<WorkItem>，不关心流程顺序
pub struct SearchAutomation {
    target_url: String,
    navigate_wait: Duration,
    reveal_wait: Duration,
    results_wait: Duration,
}

impl SearchAutomation {
    /// 创建新的搜索自动化服务
    pub fn new(config: &Config) -> Self {
        Self {
            target_url: config.target_url.clone(),
            navigate_wait: Duration::from_secs(config.navigate_wait_secs),
            reveal_wait: Duration::from_secs(config.reveal_wait_secs),
            results_wait: Duration::from_secs(config.results_wait_secs),
        }
    }

    /// 执行一次完整的站内搜索，返回结果页 HTML
    ///
    /// 任何阶段失败都会中止后续阶段，不返回部分结果
    pub async fn run(
        &self,
        session: &dyn BrowserSession,
        search_term: &str,
    ) -> Result<String, AutomationError> {
        // ========== 阶段 1: 导航到站点首页 ==========
        debug!("正在打开 {} ...", self.target_url);
        session.navigate(&self.target_url).await?;
        sleep(self.navigate_wait).await;

        // ========== 阶段 2: 展开搜索框 ==========
        debug!("点击搜索按钮...");
        let search_button = session
            .query_selector(SEARCH_BUTTON_SELECTOR)
            .await?
            .ok_or_else(|| {
                AutomationError::element_not_found(STAGE_REVEAL_SEARCH, SEARCH_BUTTON_SELECTOR)
            })?;
        search_button.click().await?;
        sleep(self.reveal_wait).await;

        // ========== 阶段 3: 输入并提交搜索词 ==========
        debug!("输入搜索词: {}", search_term);
        let search_input = session
            .query_selector(SEARCH_INPUT_SELECTOR)
            .await?
            .ok_or_else(|| {
                AutomationError::element_not_found(STAGE_SUBMIT_QUERY, SEARCH_INPUT_SELECTOR)
            })?;
        search_input.fill(search_term).await?;

        let submit_button = session
            .query_selector(SUBMIT_BUTTON_SELECTOR)
            .await?
            .ok_or_else(|| {
                AutomationError::element_not_found(STAGE_SUBMIT_QUERY, SUBMIT_BUTTON_SELECTOR)
            })?;
        submit_button.click().await?;
        sleep(self.results_wait).await;

        // ========== 阶段 4: 捕获结果页 ==========
        debug!("捕获结果页 HTML");
        session.full_content().await
    }
}
