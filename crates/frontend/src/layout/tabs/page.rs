use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::logging::log;
use leptos::prelude::*;

/// Content of one open tab.
///
/// Built once when the tab opens and hidden while another tab is active, so
/// a list keeps its page, filters and scroll position across tab switches.
#[component]
pub fn TabPage(tab: TabData, tabs_store: AppGlobalContext) -> impl IntoView {
    let key = StoredValue::new(tab.key.clone());
    let is_active = move || key.with_value(|k| tabs_store.active.with(|a| a.as_deref() == Some(k.as_str())));

    log!("tab '{}' mounted", tab.key);
    on_cleanup(move || {
        if let Some(k) = key.try_get_value() {
            log!("tab '{}' disposed", k);
        }
    });

    let content = render_tab_content(&tab.key);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab.key
        >
            {content}
        </div>
    }
}
