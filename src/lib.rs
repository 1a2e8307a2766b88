//! # Gothamist News Scraper
//!
//! 一个用于 Gothamist 新闻搜索抓取的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Browser）
//! - `browser/` - 持有稀缺资源（Browser 进程），只暴露能力
//! - `BrowserDriver` / `BrowserSession` - 浏览器能力接口
//! - `ChromeDriver` - 基于 chromiumoxide 的无头浏览器实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个搜索词
//! - `SearchAutomation` - 站内搜索自动化能力
//! - `ArticleExtractor` - 结果页文章解析能力
//! - `TextAnalyzer` - 词频与金额检测能力
//! - `ResultWriter` - CSV 写出能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个工作项"的完整处理流程
//! - `ItemCtx` - 上下文封装（工作项序号）
//! - `ScrapeFlow` - 流程编排（校验 → 抓取 → 解析 → 写出）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/pipeline` - 抓取流水线，管理资源和统计
//! - `orchestrator/item_runner` - 工作项执行器，管理并发和失败隔离
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use browser::{BrowserDriver, BrowserSession, ChromeDriver, ElementHandle};
pub use config::{Config, ExecutionMode};
pub use error::{AppError, AppResult, AutomationError, OutputError};
pub use models::{load_work_items, ArticleRecord, FailureCode, FailureKind, ItemStatus, WorkItem};
pub use orchestrator::{run_work_items, App, RunStats};
pub use services::{ArticleExtractor, ResultWriter, SearchAutomation, TextAnalyzer};
pub use workflow::{ItemCtx, ScrapeFlow};
