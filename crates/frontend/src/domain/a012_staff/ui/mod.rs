pub mod list;

pub use list::StaffList;
