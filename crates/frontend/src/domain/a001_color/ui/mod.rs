pub mod list;

pub use list::ColorList;
