pub mod list;

pub use list::CounterSaleList;
