use thiserror::Error;

/// 装箱的底层错误（可跨线程传递）
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 浏览器自动化错误
#[derive(Debug, Error)]
pub enum AutomationError {
    /// 页面上找不到目标元素
    #[error("「{stage}」阶段未找到页面元素: {selector}")]
    ElementNotFound {
        stage: &'static str,
        selector: String,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    Navigation { url: String, source: BoxError },
    /// 元素查询失败
    #[error("查询选择器 {selector} 失败: {source}")]
    Query { selector: String, source: BoxError },
    /// 元素交互失败
    #[error("元素操作「{action}」失败: {source}")]
    Interaction {
        action: &'static str,
        source: BoxError,
    },
    /// 获取页面 HTML 失败
    #[error("获取页面内容失败: {source}")]
    Snapshot { source: BoxError },
    /// 创建浏览器会话失败
    #[error("创建浏览器会话失败: {source}")]
    SessionCreate { source: BoxError },
    /// 关闭浏览器会话失败
    #[error("关闭浏览器会话失败: {source}")]
    SessionClose { source: BoxError },
}

/// 结果输出错误
#[derive(Debug, Error)]
pub enum OutputError {
    /// 创建输出目录失败
    #[error("创建输出目录失败 ({path}): {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },
    /// 写入 CSV 文件失败
    #[error("写入CSV文件失败 ({path}): {source}")]
    CsvWrite { path: String, source: csv::Error },
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器自动化错误
    #[error("浏览器自动化错误: {0}")]
    Automation(#[from] AutomationError),
    /// 结果输出错误
    #[error("输出错误: {0}")]
    Output(#[from] OutputError),
}

// ========== 便捷构造函数 ==========

impl AutomationError {
    /// 创建元素未找到错误
    pub fn element_not_found(stage: &'static str, selector: impl Into<String>) -> Self {
        AutomationError::ElementNotFound {
            stage,
            selector: selector.into(),
        }
    }

    /// 创建导航错误
    pub fn navigation(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AutomationError::Navigation {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// 创建元素查询错误
    pub fn query(
        selector: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AutomationError::Query {
            selector: selector.into(),
            source: Box::new(source),
        }
    }

    /// 创建元素交互错误
    pub fn interaction(
        action: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AutomationError::Interaction {
            action,
            source: Box::new(source),
        }
    }

    /// 创建页面内容获取错误
    pub fn snapshot(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AutomationError::Snapshot {
            source: Box::new(source),
        }
    }

    /// 创建会话创建错误
    pub fn session_create(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AutomationError::SessionCreate {
            source: Box::new(source),
        }
    }

    /// 创建会话关闭错误
    pub fn session_close(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AutomationError::SessionClose {
            source: Box::new(source),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
