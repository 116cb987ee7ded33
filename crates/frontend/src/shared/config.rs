//! Application configuration.
//!
//! Defaults are compiled in from `config.default.toml`. A partial TOML
//! document stored under `localStorage["helmet.config"]` is merged on top of
//! them at startup; an override that does not parse is logged and ignored.

use anyhow::Context;
use once_cell::sync::OnceCell;
use serde::Deserialize;

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = include_str!("../../config.default.toml");

/// localStorage key holding the TOML override
pub const OVERRIDE_KEY: &str = "helmet.config";

/// Port of the store API when `api.base_url` is empty
pub const DEFAULT_API_PORT: u16 = 8080;

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub search_debounce_ms: u32,
    pub toast_timeout_ms: u32,
    pub invoice_refresh_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 15,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![5, 10, 20, 50],
            search_debounce_ms: 300,
            toast_timeout_ms: 4000,
            invoice_refresh_secs: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Unknown level names fall back to `Debug`
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level
            .trim()
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Debug)
    }
}

impl UiConfig {
    /// Page size options always contain the default page size, sorted
    pub fn page_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self
            .page_size_options
            .iter()
            .copied()
            .filter(|size| *size > 0)
            .collect();
        if !sizes.contains(&self.default_page_size) && self.default_page_size > 0 {
            sizes.push(self.default_page_size);
        }
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Parse the embedded defaults with an optional TOML override merged on top
pub fn parse_config(overlay: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut base: toml::Value =
        toml::from_str(DEFAULT_CONFIG).context("embedded default config is invalid")?;
    if let Some(raw) = overlay {
        let overlay: toml::Value =
            toml::from_str(raw).context("config override is not valid TOML")?;
        merge_toml(&mut base, overlay);
    }
    base.try_into()
        .context("config override has values of the wrong type")
}

/// Tables merge key by key, anything else replaces the base value
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

fn read_override() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(OVERRIDE_KEY).ok()?
}

/// Load once: defaults plus the stored override when it is usable
pub fn load() -> AppConfig {
    let overlay = read_override();
    match parse_config(overlay.as_deref()) {
        Ok(config) => {
            if overlay.is_some() {
                log::info!("Config override loaded from localStorage[{}]", OVERRIDE_KEY);
            }
            config
        }
        Err(err) => {
            log::warn!("Ignoring config override: {:#}", err);
            parse_config(None).unwrap_or_default()
        }
    }
}

/// Process-wide configuration, loaded on first use
pub fn current() -> &'static AppConfig {
    CONFIG.get_or_init(load)
}

/// Base URL of the store API
pub fn resolve_api_base(configured: &str, protocol: &str, hostname: &str) -> String {
    let configured = configured.trim().trim_end_matches('/');
    if configured.is_empty() {
        format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
    } else {
        configured.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.ui.search_debounce_ms, 300);
        assert_eq!(config.ui.invoice_refresh_secs, 5);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = parse_config(Some(
            r#"
            [api]
            base_url = "https://shop.example.vn/"

            [ui]
            default_page_size = 20
            "#,
        ))
        .unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.vn/");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.ui.default_page_size, 20);
        assert_eq!(config.ui.toast_timeout_ms, 4000);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        assert!(parse_config(Some("[ui\nbroken")).is_err());
        assert!(parse_config(Some("[ui]\ndefault_page_size = \"ten\"")).is_err());
    }

    #[test]
    fn test_level_filter() {
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
        logging.level = "WARN".to_string();
        assert_eq!(logging.level_filter(), log::LevelFilter::Warn);
        logging.level = "chatty".to_string();
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_page_sizes_include_default() {
        let ui = UiConfig {
            default_page_size: 15,
            page_size_options: vec![50, 10, 0, 10],
            ..UiConfig::default()
        };
        assert_eq!(ui.page_sizes(), vec![10, 15, 50]);
    }

    #[test]
    fn test_resolve_api_base() {
        assert_eq!(resolve_api_base("", "http:", "localhost"), "http://localhost:8080");
        assert_eq!(
            resolve_api_base(" https://api.shop.vn/ ", "http:", "localhost"),
            "https://api.shop.vn"
        );
    }
}
