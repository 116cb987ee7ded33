pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod form;
pub mod http;
pub mod icons;
pub mod list_store;
pub mod list_utils;
pub mod lookup_page;
pub mod modal;
pub mod notifications;
pub mod page_frame;
pub mod resource_page;
