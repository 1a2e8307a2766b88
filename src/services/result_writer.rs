//! 结果写出服务 - 业务能力层
//!
//! 只负责"把一批文章记录写成 CSV 文件"能力，不关心流程

use std::path::PathBuf;

use csv::Writer;
use tracing::debug;

use crate::config::Config;
use crate::error::OutputError;
use crate::models::article::ArticleRecord;

/// CSV 表头（七列，顺序固定）
const CSV_HEADERS: [&str; 7] = [
    "Title",
    "Date",
    "Description",
    "Image URL",
    "Title Count",
    "Description Count",
    "Contains Money",
];

/// 输出文件名前缀
const FILE_PREFIX: &str = "gothamist_news_";

/// 结果写出服务
///
/// 职责：
/// - 每个搜索词对应一个独立的 CSV 文件（重跑时整体覆盖）
/// - 总是写出表头，记录为空时产出只有表头的文件
/// - 写出失败以 OutputError 返回，绝不吞掉
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    /// 创建新的结果写出服务
    pub fn new(config: &Config) -> Self {
        Self {
            output_dir: PathBuf::from(&config.output_dir),
        }
    }

    /// 使用自定义输出目录创建
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: dir.into(),
        }
    }

    /// 确保输出目录存在
    pub fn ensure_output_dir(&self) -> Result<(), OutputError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| OutputError::CreateDir {
            path: self.output_dir.display().to_string(),
            source: e,
        })
    }

    /// 计算一个搜索词对应的输出文件路径
    ///
    /// 搜索词中的空白字符替换为下划线
    pub fn output_path(&self, search_term: &str) -> PathBuf {
        let sanitized: String = search_term
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        self.output_dir.join(format!("{FILE_PREFIX}{sanitized}.csv"))
    }

    /// 写出一个搜索词的全部文章记录
    ///
    /// 返回写入的文件路径
    pub fn write(
        &self,
        search_term: &str,
        records: &[ArticleRecord],
    ) -> Result<PathBuf, OutputError> {
        let path = self.output_path(search_term);
        let csv_err = |source: csv::Error| OutputError::CsvWrite {
            path: path.display().to_string(),
            source,
        };

        let mut writer = Writer::from_path(&path).map_err(csv_err)?;

        writer.write_record(CSV_HEADERS).map_err(csv_err)?;

        for record in records {
            let title_count = record.title_match_count.to_string();
            let description_count = record.description_match_count.to_string();
            let contains_money = record.contains_money.to_string();

            writer
                .write_record([
                    record.title.as_str(),
                    record.date.as_str(),
                    record.description.as_str(),
                    record.image_url.as_str(),
                    title_count.as_str(),
                    description_count.as_str(),
                    contains_money.as_str(),
                ])
                .map_err(csv_err)?;
        }

        // 在返回前冲刷缓冲，让写盘错误在这里暴露
        writer
            .flush()
            .map_err(|e| csv_err(csv::Error::from(e)))?;

        debug!("已写入 {} 条记录到 {}", records.len(), path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(title: &str, money: bool) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            date: "Aug 12, 2025".to_string(),
            description: "A short description".to_string(),
            image_url: "https://example.com/a.jpg".to_string(),
            title_match_count: 2,
            description_match_count: 0,
            contains_money: money,
        }
    }

    #[test]
    fn test_output_path_sanitizes_whitespace() {
        let writer = ResultWriter::with_dir("output");
        assert_eq!(
            writer.output_path("climate change"),
            PathBuf::from("output/gothamist_news_climate_change.csv")
        );
        assert_eq!(
            writer.output_path("subway"),
            PathBuf::from("output/gothamist_news_subway.csv")
        );
    }

    #[test]
    fn test_write_header_only_when_empty() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let writer = ResultWriter::with_dir(dir.path());

        let path = writer.write("empty", &[]).expect("写出失败");

        let content = std::fs::read_to_string(&path).expect("读取输出文件失败");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 1, "空结果应只有表头");
        assert_eq!(
            lines[0],
            "Title,Date,Description,Image URL,Title Count,Description Count,Contains Money"
        );
    }

    #[test]
    fn test_write_one_line_per_record() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let writer = ResultWriter::with_dir(dir.path());

        let records = vec![
            sample_record("First article", false),
            sample_record("Second article", true),
        ];
        let path = writer.write("news", &records).expect("写出失败");

        let content = std::fs::read_to_string(&path).expect("读取输出文件失败");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3, "表头 + 每条记录一行");
        assert_eq!(
            lines[1],
            "First article,\"Aug 12, 2025\",A short description,https://example.com/a.jpg,2,0,false"
        );
        assert_eq!(
            lines[2],
            "Second article,\"Aug 12, 2025\",A short description,https://example.com/a.jpg,2,0,true"
        );
    }

    #[test]
    fn test_write_truncates_previous_file() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let writer = ResultWriter::with_dir(dir.path());

        writer
            .write("news", &[sample_record("Old", false)])
            .expect("第一次写出失败");
        let path = writer.write("news", &[]).expect("第二次写出失败");

        let content = std::fs::read_to_string(&path).expect("读取输出文件失败");
        assert_eq!(content.lines().count(), 1, "重写后旧内容应被覆盖");
    }
}
