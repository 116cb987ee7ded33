pub mod list;

pub use list::OriginList;
