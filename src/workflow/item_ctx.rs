//! 工作项处理上下文
//!
//! 封装"我正在处理第几个工作项"这一信息

use std::fmt::Display;

/// 工作项处理上下文
///
/// 只承载日志展示所需的信息，不参与业务判断
#[derive(Debug, Clone)]
pub struct ItemCtx {
    /// 工作项序号（从1开始）
    pub item_index: usize,
}

impl ItemCtx {
    /// 创建新的工作项上下文
    pub fn new(item_index: usize) -> Self {
        Self { item_index }
    }
}

impl Display for ItemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[任务 {}]", self.item_index)
    }
}
