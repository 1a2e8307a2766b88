pub mod work_items;

pub use work_items::load_work_items;
