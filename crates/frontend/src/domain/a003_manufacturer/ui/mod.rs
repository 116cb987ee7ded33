pub mod list;

pub use list::ManufacturerList;
