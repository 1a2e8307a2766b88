//! 新闻文章数据模型

/// 标题缺失时的占位文本
pub const NO_TITLE: &str = "No title available";
/// 日期缺失时的占位文本
pub const NO_DATE: &str = "No date available";
/// 摘要缺失时的占位文本
pub const NO_DESCRIPTION: &str = "No description available";

/// 搜索结果页中的一条文章记录
///
/// 由一张结果卡片提取而来，附带针对搜索词的统计字段，生成后不再修改
#[derive(Clone, Debug, PartialEq)]
pub struct ArticleRecord {
    /// 文章标题
    pub title: String,
    /// 发布日期
    pub date: String,
    /// 文章摘要
    pub description: String,
    /// 配图 URL（缺失时为空字符串）
    pub image_url: String,
    /// 搜索词在标题中出现的次数
    pub title_match_count: usize,
    /// 搜索词在摘要中出现的次数
    pub description_match_count: usize,
    /// 标题或摘要中是否出现金额
    pub contains_money: bool,
}
