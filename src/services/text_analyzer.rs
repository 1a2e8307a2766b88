//! 文本统计服务 - 业务能力层
//!
//! 只负责针对单个搜索词的文本统计能力，不关心流程

use regex::{Regex, RegexBuilder};

/// 金额识别模式：$12.50 / 100 dollars / 20 USD
const MONEY_PATTERN: &str = r"\$\d+(\.\d+)?|\d+\s*dollars|\d+\s*USD";

/// 文本统计服务
///
/// 职责：
/// - 统计搜索词在文本中的出现次数
/// - 识别文本中的金额表述
/// - 只处理单段文本，不出现 Vec<ArticleRecord>
/// - 不关心流程顺序
pub struct TextAnalyzer {
    term_pattern: Regex,
    money_pattern: Regex,
}

impl TextAnalyzer {
    /// 为一个搜索词创建统计服务
    ///
    /// 搜索词先转义再编译，词中的正则元字符只做字面匹配
    pub fn new(search_term: &str) -> Self {
        let term_pattern = RegexBuilder::new(&regex::escape(search_term))
            .case_insensitive(true)
            .build()
            .expect("转义后的搜索词必定是合法正则");

        let money_pattern = RegexBuilder::new(MONEY_PATTERN)
            .case_insensitive(true)
            .build()
            .expect("金额识别模式必定是合法正则");

        Self {
            term_pattern,
            money_pattern,
        }
    }

    /// 统计搜索词在文本中出现的次数
    ///
    /// 大小写不敏感，匹配不重叠；空文本返回 0
    pub fn count_occurrences(&self, text: &str) -> usize {
        self.term_pattern.find_iter(text).count()
    }

    /// 判断文本中是否出现金额表述
    ///
    /// 只识别 $ 前缀、dollars、USD 三种写法，其他货币表述不在范围内
    pub fn contains_money(&self, text: &str) -> bool {
        self.money_pattern.is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_occurrences_case_insensitive() {
        let analyzer = TextAnalyzer::new("climate");
        assert_eq!(
            analyzer.count_occurrences("Climate crisis: climate experts on CLIMATE policy"),
            3
        );
    }

    #[test]
    fn test_count_occurrences_literal_metacharacters() {
        // 搜索词中的正则元字符必须按字面匹配
        let analyzer = TextAnalyzer::new("$5");
        assert_eq!(analyzer.count_occurrences("Paid $5 FIVE dollars"), 1);

        let analyzer = TextAnalyzer::new("a.b");
        assert_eq!(analyzer.count_occurrences("a.b aXb a.b"), 2);
    }

    #[test]
    fn test_count_occurrences_empty_text() {
        let analyzer = TextAnalyzer::new("news");
        assert_eq!(analyzer.count_occurrences(""), 0);
    }

    #[test]
    fn test_count_occurrences_non_overlapping() {
        let analyzer = TextAnalyzer::new("aa");
        assert_eq!(analyzer.count_occurrences("aaaa"), 2);
    }

    #[test]
    fn test_contains_money_positive() {
        let analyzer = TextAnalyzer::new("news");
        assert!(analyzer.contains_money("Tickets cost $12.50 each"));
        assert!(analyzer.contains_money("A fine of 100 dollars"));
        assert!(analyzer.contains_money("Budget of 20 USD approved"));
        assert!(analyzer.contains_money("About 20usd total"));
        assert!(analyzer.contains_money("Roughly 500 Dollars"));
    }

    #[test]
    fn test_contains_money_negative() {
        let analyzer = TextAnalyzer::new("news");
        assert!(!analyzer.contains_money("Free admission for everyone"));
        // $ 与数字之间不允许有空格
        assert!(!analyzer.contains_money("Pay $ now"));
        assert!(!analyzer.contains_money(""));
        // 其他货币写法不识别
        assert!(!analyzer.contains_money("costs 20 euros"));
    }
}
