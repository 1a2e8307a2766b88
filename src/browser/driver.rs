//! 浏览器能力接口 - 基础设施层
//!
//! 把流程需要的浏览器操作收敛为三个对象安全的 trait：
//! 驱动（开会话）、会话（页面操作）、元素（点击/输入）。
//! 生产实现见 `chrome` 模块，测试可以换成脚本化实现。

use async_trait::async_trait;

use crate::error::AutomationError;

/// 页面元素句柄
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// 点击元素
    async fn click(&self) -> Result<(), AutomationError>;

    /// 向元素输入文本
    async fn fill(&self, text: &str) -> Result<(), AutomationError>;
}

/// 一次独立的浏览器会话（对应一个标签页）
///
/// 会话之间互不共享，关闭即释放页面资源
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 导航到指定 URL
    async fn navigate(&self, url: &str) -> Result<(), AutomationError>;

    /// 查询单个元素，页面上不存在时返回 None
    async fn query_selector(
        &self,
        selector: &str,
    ) -> Result<Option<Box<dyn ElementHandle>>, AutomationError>;

    /// 获取当前页面的完整 HTML
    async fn full_content(&self) -> Result<String, AutomationError>;

    /// 关闭会话并释放页面
    async fn close_session(self: Box<Self>) -> Result<(), AutomationError>;
}

/// 浏览器驱动：会话工厂
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// 打开一个新会话
    async fn new_session(&self) -> Result<Box<dyn BrowserSession>, AutomationError>;
}
