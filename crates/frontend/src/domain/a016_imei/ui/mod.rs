pub mod list;

pub use list::{ImeiList, ProductImeiList};
