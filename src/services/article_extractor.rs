//! 文章卡片提取服务 - 业务能力层
//!
//! 把搜索结果页的 HTML 解析为文章记录。解析是同步纯函数，
//! 不持有页面资源，也不关心流程

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::article::{ArticleRecord, NO_DATE, NO_DESCRIPTION, NO_TITLE};
use crate::services::text_analyzer::TextAnalyzer;

/// 结果卡片选择器（类名 lg:mb-5 中的冒号需要转义）
const CARD_SELECTOR: &str = r"div.v-card.gothamist-card.mod-horizontal.mb-3.lg\:mb-5.tag-small";
/// 卡片内的标题
const TITLE_SELECTOR: &str = "div.h2";
/// 卡片内的发布日期
const DATE_SELECTOR: &str = "span.article-item__date";
/// 卡片内的摘要
const DESCRIPTION_SELECTOR: &str = "p.desc";
/// 卡片内的配图
const IMAGE_SELECTOR: &str = "img.native-image";

/// 文章卡片提取服务
///
/// 职责：
/// - 定位结果页中的文章卡片并按文档顺序提取
/// - 子字段缺失时回退到占位文本
/// - 借助 TextAnalyzer 填充统计字段
pub struct ArticleExtractor {
    card: Selector,
    title: Selector,
    date: Selector,
    description: Selector,
    image: Selector,
}

impl ArticleExtractor {
    /// 创建提取服务（选择器为固定字面量，解析失败属于编程错误）
    pub fn new() -> Self {
        Self {
            card: Selector::parse(CARD_SELECTOR).unwrap(),
            title: Selector::parse(TITLE_SELECTOR).unwrap(),
            date: Selector::parse(DATE_SELECTOR).unwrap(),
            description: Selector::parse(DESCRIPTION_SELECTOR).unwrap(),
            image: Selector::parse(IMAGE_SELECTOR).unwrap(),
        }
    }

    /// 从结果页 HTML 提取全部文章记录
    ///
    /// 页面上没有卡片时返回空列表，属于正常结果而不是错误
    pub fn extract(&self, html: &str, search_term: &str) -> Vec<ArticleRecord> {
        let document = Html::parse_document(html);
        let analyzer = TextAnalyzer::new(search_term);

        let records: Vec<ArticleRecord> = document
            .select(&self.card)
            .map(|card| self.extract_card(&card, &analyzer))
            .collect();

        debug!("从结果页提取到 {} 条文章记录", records.len());

        records
    }

    /// 提取单张卡片
    fn extract_card(&self, card: &ElementRef<'_>, analyzer: &TextAnalyzer) -> ArticleRecord {
        let title = self
            .select_text(card, &self.title)
            .unwrap_or_else(|| NO_TITLE.to_string());
        let date = self
            .select_text(card, &self.date)
            .unwrap_or_else(|| NO_DATE.to_string());
        let description = self
            .select_text(card, &self.description)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        // 配图缺失时记为空字符串
        let image_url = card
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(|src| src.trim().to_string())
            .unwrap_or_default();

        // 统计字段基于回退后的文本计算
        let title_match_count = analyzer.count_occurrences(&title);
        let description_match_count = analyzer.count_occurrences(&description);
        let contains_money =
            analyzer.contains_money(&title) || analyzer.contains_money(&description);

        ArticleRecord {
            title,
            date,
            description,
            image_url,
            title_match_count,
            description_match_count,
            contains_money,
        }
    }

    /// 取第一个命中元素的全部文本并去除首尾空白
    fn select_text(&self, card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
        card.select(selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new()
    }
}
