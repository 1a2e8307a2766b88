//! 浏览器基础设施层
//!
//! `driver` 定义自动化所需的最小能力接口，`chrome` 提供基于
//! chromiumoxide 的无头浏览器实现。上层只依赖接口，不接触 CDP 细节。

pub mod chrome;
pub mod driver;

pub use chrome::ChromeDriver;
pub use driver::{BrowserDriver, BrowserSession, ElementHandle};
