mod ids;
mod item;
mod ordering;
mod stat;
mod store;

pub use ids::ItemId;
pub use item::{Item, ItemError, answers_match, normalize_answer, strip_annotations};
pub use ordering::{DEFAULT_LOCAL_WINDOW, Reorder, Segment};
pub use stat::ItemStat;
pub use store::ItemStore;
