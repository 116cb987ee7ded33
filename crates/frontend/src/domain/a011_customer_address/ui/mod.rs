pub mod list;

pub use list::CustomerAddressList;
