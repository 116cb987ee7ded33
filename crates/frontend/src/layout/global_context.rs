use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::tab_label_for_key;

/// Open tabs and panel visibility, shared through context
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Restore the active tab from `?active=...` and keep the URL in sync
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active").cloned() {
            let title = match tab_label_for_key(&active_key) {
                "" => active_key.clone(),
                label => label.to_string(),
            };
            self.open_tab(&active_key, &title);
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                    .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search == new_url {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                let _ = history.replace_state_with_url(
                    &wasm_bindgen::JsValue::NULL,
                    "",
                    Some(&new_url),
                );
            }
        });
    }

    /// Open a tab, or just activate it when the key is already open
    pub fn open_tab(&self, key: &str, title: &str) {
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            log::debug!("open tab '{}' ({})", key, title);
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn update_tab_title(&self, key: &str, new_title: &str) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = new_title.to_string();
            }
        });
    }

    /// Closing the active tab activates the last remaining one
    pub fn close_tab(&self, key: &str) {
        log::debug!("close tab '{}'", key);
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()));
            self.active.set(next_active);
        }
    }

    pub fn close_all(&self) {
        log::debug!("close all tabs");
        self.opened.set(Vec::new());
        self.active.set(None);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ctx: &AppGlobalContext) -> Vec<String> {
        ctx.opened
            .get_untracked()
            .into_iter()
            .map(|t| t.key)
            .collect()
    }

    #[test]
    fn opening_an_open_tab_only_activates_it() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = AppGlobalContext::new();
            ctx.open_tab("a001_color", "Màu sắc");
            ctx.open_tab("a002_material", "Chất liệu");
            ctx.open_tab("a001_color", "Màu sắc");

            assert_eq!(keys(&ctx), vec!["a001_color", "a002_material"]);
            assert_eq!(ctx.active.get_untracked().as_deref(), Some("a001_color"));
        });
    }

    #[test]
    fn closing_the_active_tab_falls_back_to_the_last_one() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = AppGlobalContext::new();
            ctx.open_tab("a001_color", "Màu sắc");
            ctx.open_tab("a002_material", "Chất liệu");
            ctx.open_tab("a003_manufacturer", "Hãng sản xuất");
            ctx.activate_tab("a002_material");

            ctx.close_tab("a002_material");
            assert_eq!(ctx.active.get_untracked().as_deref(), Some("a003_manufacturer"));

            ctx.close_tab("a001_color");
            assert_eq!(ctx.active.get_untracked().as_deref(), Some("a003_manufacturer"));

            ctx.close_tab("a003_manufacturer");
            assert_eq!(ctx.active.get_untracked(), None);
        });
    }

    #[test]
    fn close_all_clears_tabs_and_selection() {
        let owner = Owner::new();
        owner.with(|| {
            let ctx = AppGlobalContext::new();
            ctx.open_tab("a009_product", "Sản phẩm");
            ctx.open_tab("a016_imei_3", "IMEI · SP003");
            ctx.close_all();
            assert!(keys(&ctx).is_empty());
            assert_eq!(ctx.active.get_untracked(), None);
        });
    }
}
