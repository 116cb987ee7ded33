pub mod list;

pub use list::VoucherList;
