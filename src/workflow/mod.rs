pub mod item_ctx;
pub mod scrape_flow;

pub use item_ctx::ItemCtx;
pub use scrape_flow::ScrapeFlow;
