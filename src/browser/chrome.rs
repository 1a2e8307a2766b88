//! 无头浏览器驱动 - 基础设施层
//!
//! 进程内只启动一个 Chromium 实例，CDP 事件在后台任务中消费；
//! 每个会话对应一个独立标签页，关闭会话即关闭标签页。

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::browser::driver::{BrowserDriver, BrowserSession, ElementHandle};
use crate::config::Config;
use crate::error::AutomationError;

/// 无头浏览器驱动
///
/// 持有唯一的 Browser 实例，只通过 `BrowserDriver` 接口向上层暴露能力
pub struct ChromeDriver {
    browser: Mutex<Browser>,
    handler_task: JoinHandle<()>,
}

impl ChromeDriver {
    /// 启动无头浏览器
    pub async fn launch(config: &Config) -> Result<Self> {
        info!("🚀 启动无头浏览器...");

        let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
            "--disable-gpu",             // 无头模式下禁用 GPU
            "--no-sandbox",              // 禁用沙盒，防止权限问题导致的崩溃
            "--disable-dev-shm-usage",   // 防止共享内存不足
            "--remote-debugging-port=0", // 让浏览器自动选择调试端口
        ]);

        if let Some(executable) = &config.chrome_executable {
            debug!("使用指定的浏览器: {}", executable);
            builder = builder.chrome_executable(Path::new(executable));
        }

        let browser_config = builder.build().map_err(|e| {
            error!("配置无头浏览器失败: {}", e);
            anyhow::anyhow!("配置无头浏览器失败: {}", e)
        })?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            error!("启动无头浏览器失败: {}", e);
            anyhow::anyhow!("启动无头浏览器失败: {}", e)
        })?;
        debug!("无头浏览器启动成功");

        // 在后台处理浏览器事件
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        // 添加短暂延迟以等待浏览器状态同步
        sleep(tokio::time::Duration::from_millis(300)).await;

        info!("✅ 无头浏览器已就绪");

        Ok(Self {
            browser: Mutex::new(browser),
            handler_task,
        })
    }

    /// 关闭浏览器并停止事件处理任务
    pub async fn shutdown(&self) {
        info!("🗑️ 正在关闭无头浏览器...");

        {
            let mut browser = self.browser.lock().await;
            if let Err(e) = browser.close().await {
                warn!("⚠️ 关闭浏览器失败: {}", e);
            }
        }

        self.handler_task.abort();
        debug!("浏览器事件处理任务已停止");
    }
}

#[async_trait]
impl BrowserDriver for ChromeDriver {
    async fn new_session(&self) -> Result<Box<dyn BrowserSession>, AutomationError> {
        let browser = self.browser.lock().await;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| AutomationError::session_create(e))?;
        debug!("已创建新的浏览器会话");

        Ok(Box::new(ChromeSession { page }))
    }
}

/// 基于 chromiumoxide Page 的会话实现
struct ChromeSession {
    page: Page,
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&self, url: &str) -> Result<(), AutomationError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| AutomationError::navigation(url, e))?;
        Ok(())
    }

    async fn query_selector(
        &self,
        selector: &str,
    ) -> Result<Option<Box<dyn ElementHandle>>, AutomationError> {
        // find_elements 在无匹配时返回空列表，以区分"元素不存在"和查询失败
        let mut elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| AutomationError::query(selector, e))?;

        if elements.is_empty() {
            return Ok(None);
        }

        let element = elements.remove(0);
        Ok(Some(Box::new(ChromeElement { element })))
    }

    async fn full_content(&self) -> Result<String, AutomationError> {
        self.page
            .content()
            .await
            .map_err(|e| AutomationError::snapshot(e))
    }

    async fn close_session(self: Box<Self>) -> Result<(), AutomationError> {
        let this = *self;
        this.page
            .close()
            .await
            .map_err(|e| AutomationError::session_close(e))?;
        Ok(())
    }
}

/// 基于 chromiumoxide Element 的元素句柄
struct ChromeElement {
    element: Element,
}

#[async_trait]
impl ElementHandle for ChromeElement {
    async fn click(&self) -> Result<(), AutomationError> {
        self.element
            .click()
            .await
            .map_err(|e| AutomationError::interaction("click", e))?;
        Ok(())
    }

    async fn fill(&self, text: &str) -> Result<(), AutomationError> {
        self.element
            .focus()
            .await
            .map_err(|e| AutomationError::interaction("focus", e))?;
        self.element
            .type_str(text)
            .await
            .map_err(|e| AutomationError::interaction("type", e))?;
        Ok(())
    }
}
