pub mod list;

pub use list::CustomerList;
