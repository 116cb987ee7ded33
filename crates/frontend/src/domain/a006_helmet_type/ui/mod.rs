pub mod list;

pub use list::HelmetTypeList;
