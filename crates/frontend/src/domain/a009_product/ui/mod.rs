pub mod list;
pub mod options;

pub use list::ProductList;
