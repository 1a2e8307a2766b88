pub mod article_extractor;
pub mod result_writer;
pub mod search_automation;
pub mod text_analyzer;

pub use article_extractor::ArticleExtractor;
pub use result_writer::ResultWriter;
pub use search_automation::SearchAutomation;
pub use text_analyzer::TextAnalyzer;
