mod category;
mod work_item;

pub use category::CategoryManager;
pub use work_item::WorkItemManager;
