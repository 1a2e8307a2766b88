//! 工作项数据模型
//!
//! 对应作业队列中的一条输入：payload 携带搜索词，
//! 处理结束后必须且只能上报一次终态（done 或 failed）

use serde_json::Value as JsonValue;
use tracing::warn;

/// 失败类别
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// 程序或环境类失败
    Application,
    /// 业务数据类失败
    Business,
}

impl FailureKind {
    /// 上报用的类别字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Application => "APPLICATION",
            FailureKind::Business => "BUSINESS",
        }
    }
}

/// 失败代码
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureCode {
    /// payload 缺失或没有 search_term 键
    InvalidPayload,
    /// search_term 是空字符串
    MissingSearchTerm,
    /// 处理过程中出现未捕获的错误
    UncaughtError,
}

impl FailureCode {
    /// 上报用的代码字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCode::InvalidPayload => "INVALID_PAYLOAD",
            FailureCode::MissingSearchTerm => "MISSING_SEARCH_TERM",
            FailureCode::UncaughtError => "UNCAUGHT_ERROR",
        }
    }
}

/// 工作项状态
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemStatus {
    /// 尚未上报终态
    Pending,
    /// 处理成功
    Done,
    /// 处理失败
    Failed {
        kind: FailureKind,
        code: FailureCode,
        message: String,
    },
}

/// 一条待处理的工作项
#[derive(Clone, Debug)]
pub struct WorkItem {
    /// 序号（从 1 开始，仅用于日志和上报）
    pub id: usize,
    /// 原始 payload，可能整体缺失
    payload: Option<JsonValue>,
    /// 当前状态
    status: ItemStatus,
}

impl WorkItem {
    /// 创建新的工作项
    pub fn new(id: usize, payload: Option<JsonValue>) -> Self {
        Self {
            id,
            payload,
            status: ItemStatus::Pending,
        }
    }

    /// 读取 payload 中的搜索词
    ///
    /// payload 缺失、不是对象、或 search_term 不是字符串时返回 None
    pub fn search_term(&self) -> Option<&str> {
        self.payload.as_ref()?.get("search_term")?.as_str()
    }

    /// 当前状态
    pub fn status(&self) -> &ItemStatus {
        &self.status
    }

    /// 是否已经上报过终态
    pub fn is_reported(&self) -> bool {
        !matches!(self.status, ItemStatus::Pending)
    }

    /// 上报成功
    ///
    /// 终态只允许上报一次：重复调用记录警告并保留第一次的结论
    pub fn mark_done(&mut self) {
        if self.is_reported() {
            warn!("[任务 {}] ⚠️ 重复上报 done 被忽略，保留已有终态", self.id);
            return;
        }
        self.status = ItemStatus::Done;
    }

    /// 上报失败
    ///
    /// 终态只允许上报一次：重复调用记录警告并保留第一次的结论
    pub fn mark_failed(
        &mut self,
        kind: FailureKind,
        code: FailureCode,
        message: impl Into<String>,
    ) {
        if self.is_reported() {
            warn!(
                "[任务 {}] ⚠️ 重复上报 failed ({}) 被忽略，保留已有终态",
                self.id,
                code.as_str()
            );
            return;
        }
        self.status = ItemStatus::Failed {
            kind,
            code,
            message: message.into(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_term_extraction() {
        let item = WorkItem::new(1, Some(json!({"search_term": "climate change"})));
        assert_eq!(item.search_term(), Some("climate change"));

        // payload 整体缺失
        let item = WorkItem::new(2, None);
        assert_eq!(item.search_term(), None);

        // payload 没有 search_term 键
        let item = WorkItem::new(3, Some(json!({"query": "news"})));
        assert_eq!(item.search_term(), None);

        // search_term 不是字符串
        let item = WorkItem::new(4, Some(json!({"search_term": 42})));
        assert_eq!(item.search_term(), None);

        // payload 不是对象
        let item = WorkItem::new(5, Some(json!([1, 2, 3])));
        assert_eq!(item.search_term(), None);
    }

    #[test]
    fn test_mark_done_is_terminal() {
        let mut item = WorkItem::new(1, Some(json!({"search_term": "news"})));
        assert!(!item.is_reported());

        item.mark_done();
        assert_eq!(*item.status(), ItemStatus::Done);

        // 第二次上报必须被忽略
        item.mark_failed(
            FailureKind::Application,
            FailureCode::UncaughtError,
            "too late",
        );
        assert_eq!(*item.status(), ItemStatus::Done, "首个终态不允许被覆盖");
    }

    #[test]
    fn test_mark_failed_is_terminal() {
        let mut item = WorkItem::new(1, None);
        item.mark_failed(
            FailureKind::Application,
            FailureCode::InvalidPayload,
            "payload 缺失",
        );

        item.mark_done();
        match item.status() {
            ItemStatus::Failed { kind, code, .. } => {
                assert_eq!(*kind, FailureKind::Application);
                assert_eq!(*code, FailureCode::InvalidPayload);
            }
            other => panic!("终态应保持 Failed，实际为 {:?}", other),
        }
    }

    #[test]
    fn test_failure_vocabulary() {
        assert_eq!(FailureKind::Application.as_str(), "APPLICATION");
        assert_eq!(FailureKind::Business.as_str(), "BUSINESS");
        assert_eq!(FailureCode::InvalidPayload.as_str(), "INVALID_PAYLOAD");
        assert_eq!(FailureCode::MissingSearchTerm.as_str(), "MISSING_SEARCH_TERM");
        assert_eq!(FailureCode::UncaughtError.as_str(), "UNCAUGHT_ERROR");
    }
}
