pub mod list;

pub use list::MaterialList;
