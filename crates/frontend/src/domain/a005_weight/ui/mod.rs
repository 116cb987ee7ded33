pub mod list;

pub use list::WeightList;
