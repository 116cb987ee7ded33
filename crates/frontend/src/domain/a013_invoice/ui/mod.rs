pub mod details;
pub mod form;
pub mod list;

pub use details::InvoiceDetail;
pub use list::InvoiceList;
