pub mod cart;
pub mod code_gen;
pub mod error;
pub mod labels;
pub mod local_store;
pub mod modal;
pub mod paging;
pub mod resource;
pub mod search_cycle;
pub mod validation;
