pub mod list;

pub use list::HelmetStyleList;
