mod aggregate;
mod category;
mod work_item;

pub use aggregate::{hydrate, Aggregate, GetAggregate};
pub use category::Category;
pub use work_item::WorkItem;
