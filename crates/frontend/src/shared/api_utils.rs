//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use crate::shared::config::{self, resolve_api_base};

/// Get the base URL for API requests
///
/// Uses `api.base_url` from the configuration; when that is empty the URL is
/// built from the current window location with the API port 8080.
///
/// # Returns
/// - API base URL like "http://localhost:8080"
/// - The configured URL (empty if neither config nor window is available)
pub fn api_base() -> String {
    let configured = &config::current().api.base_url;
    let window = match web_sys::window() {
        Some(w) => w,
        None => return configured.trim().to_string(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    resolve_api_base(configured, &protocol, &hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/mau-sac/12");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
