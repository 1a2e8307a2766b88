pub mod article;
pub mod loaders;
pub mod work_item;

pub use article::ArticleRecord;
pub use loaders::load_work_items;
pub use work_item::{FailureCode, FailureKind, ItemStatus, WorkItem};
