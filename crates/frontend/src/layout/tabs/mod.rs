//! Tab host: key to title, key to view, and the wrapper of one tab's content.

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key};
