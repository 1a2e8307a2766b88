/// 工作项执行模式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionMode {
    /// 逐个串行处理
    Sequential,
    /// 并发批量处理
    Concurrent,
}

impl ExecutionMode {
    /// 从字符串解析执行模式（大小写不敏感），无法识别时返回 None
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sequential" => Some(ExecutionMode::Sequential),
            "concurrent" => Some(ExecutionMode::Concurrent),
            _ => None,
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的工作项数量
    pub max_concurrent_items: usize,
    /// 执行模式
    pub execution_mode: ExecutionMode,
    /// 目标URL
    pub target_url: String,
    /// 工作项文件路径
    pub work_items_file: String,
    /// CSV 输出目录
    pub output_dir: String,
    /// 导航完成后的固定等待（秒）
    pub navigate_wait_secs: u64,
    /// 展开搜索框后的固定等待（秒）
    pub reveal_wait_secs: u64,
    /// 提交搜索后的固定等待（秒）
    pub results_wait_secs: u64,
    /// 浏览器可执行文件路径（可选，默认自动探测）
    pub chrome_executable: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_items: 4,
            execution_mode: ExecutionMode::Concurrent,
            target_url: "https://gothamist.com/".to_string(),
            work_items_file: "work-items.json".to_string(),
            output_dir: "output".to_string(),
            navigate_wait_secs: 10,
            reveal_wait_secs: 5,
            results_wait_secs: 10,
            chrome_executable: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_items: std::env::var("MAX_CONCURRENT_ITEMS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_items),
            execution_mode: std::env::var("EXECUTION_MODE").ok().and_then(|v| ExecutionMode::parse(&v)).unwrap_or(default.execution_mode),
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            work_items_file: std::env::var("WORK_ITEMS_FILE").unwrap_or(default.work_items_file),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            navigate_wait_secs: std::env::var("NAVIGATE_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.navigate_wait_secs),
            reveal_wait_secs: std::env::var("REVEAL_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.reveal_wait_secs),
            results_wait_secs: std::env::var("RESULTS_WAIT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.results_wait_secs),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_mode_parse() {
        assert_eq!(
            ExecutionMode::parse("sequential"),
            Some(ExecutionMode::Sequential)
        );
        assert_eq!(
            ExecutionMode::parse("Concurrent"),
            Some(ExecutionMode::Concurrent)
        );
        assert_eq!(
            ExecutionMode::parse("  CONCURRENT  "),
            Some(ExecutionMode::Concurrent)
        );
        assert_eq!(ExecutionMode::parse("parallel"), None);
        assert_eq!(ExecutionMode::parse(""), None);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.execution_mode, ExecutionMode::Concurrent);
        assert_eq!(config.target_url, "https://gothamist.com/");
        assert_eq!(config.output_dir, "output");
        assert_eq!(config.navigate_wait_secs, 10);
        assert_eq!(config.reveal_wait_secs, 5);
        assert_eq!(config.results_wait_secs, 10);
    }
}
