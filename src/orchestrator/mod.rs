//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量调度和资源管理，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `pipeline` - 抓取流水线
//! - 管理应用生命周期（初始化、运行、清理）
//! - 加载工作项清单（Vec<WorkItem>）
//! - 管理浏览器资源（ChromeDriver）
//! - 输出全局统计信息
//!
//! ### `item_runner` - 工作项执行器
//! - 按配置分发串行 / 并发执行
//! - 控制并发数量（Semaphore）
//! - 隔离单个工作项的错误和 panic
//! - 兜底补报缺失的终态
//!
//! ## 层次关系
//!
//! ```text
//! pipeline (处理 Vec<WorkItem>)
//!     ↓
//! item_runner (处理单个 WorkItem)
//!     ↓
//! workflow::ScrapeFlow (单个工作项的处理流程)
//!     ↓
//! services (能力层：automation / extract / analyze / write)
//!     ↓
//! browser (基础设施：BrowserDriver / BrowserSession)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：pipeline 管全局，item_runner 管单个
//! 2. **资源隔离**：只有编排层持有 ChromeDriver
//! 3. **向下依赖**：编排层 → workflow → services → browser
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod item_runner;
pub mod pipeline;

// 重新导出主要类型
pub use item_runner::run_work_items;
pub use pipeline::{App, RunStats};
