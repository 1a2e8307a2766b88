use crate::models::work_item::WorkItem;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::Path;
use tokio::fs;

/// 工作项文件中的一条原始记录
///
/// payload 可能整体缺失或格式不符，保留到流程层再判定失败
#[derive(Debug, Deserialize)]
struct RawWorkItem {
    #[serde(default)]
    payload: Option<JsonValue>,
}

/// 从 JSON 文件加载全部工作项
///
/// 文件格式为数组：`[{"payload": {"search_term": "..."}}, ...]`，
/// 工作项序号从 1 开始编号
pub async fn load_work_items(file_path: &str) -> Result<Vec<WorkItem>> {
    let path = Path::new(file_path);

    if !path.exists() {
        anyhow::bail!("工作项文件不存在: {}", file_path);
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取工作项文件: {}", file_path))?;

    let raw_items: Vec<RawWorkItem> = serde_json::from_str(&content)
        .with_context(|| format!("无法解析工作项文件: {}", file_path))?;

    let items: Vec<WorkItem> = raw_items
        .into_iter()
        .enumerate()
        .map(|(index, raw)| WorkItem::new(index + 1, raw.payload))
        .collect();

    tracing::info!("成功加载 {} 个工作项", items.len());

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_items_file(dir: &tempfile::TempDir, content: &str) -> String {
        let path = dir.path().join("work-items.json");
        let mut file = std::fs::File::create(&path).expect("创建测试文件失败");
        file.write_all(content.as_bytes()).expect("写入测试文件失败");
        path.to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn test_load_work_items() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = write_items_file(
            &dir,
            r#"[
                {"payload": {"search_term": "climate change"}},
                {"payload": {"search_term": "housing"}},
                {}
            ]"#,
        );

        let items = load_work_items(&path).await.expect("加载工作项失败");

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].search_term(), Some("climate change"));
        assert_eq!(items[1].id, 2);
        assert_eq!(items[1].search_term(), Some("housing"));
        // payload 缺失的条目也要加载进来，由流程层判定失败
        assert_eq!(items[2].id, 3);
        assert_eq!(items[2].search_term(), None);
    }

    #[tokio::test]
    async fn test_load_work_items_odd_payload() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = write_items_file(&dir, r#"[{"payload": 123}]"#);

        let items = load_work_items(&path).await.expect("加载工作项失败");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].search_term(), None);
    }

    #[tokio::test]
    async fn test_load_work_items_missing_file() {
        let result = load_work_items("no-such-dir/work-items.json").await;
        assert!(result.is_err(), "文件不存在应该报错");
    }
}
