pub mod list;

pub use list::PromotionList;
