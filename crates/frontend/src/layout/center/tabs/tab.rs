use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// One entry of the tab bar
#[component]
pub fn Tab(tab: TabData) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let key = StoredValue::new(tab.key);
    let is_active = Memo::new(move |_| {
        key.with_value(|k| ctx.active.with(|a| a.as_deref() == Some(k.as_str())))
    });
    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        key.with_value(|k| ctx.close_tab(k));
    };

    let title = tab.title.clone();

    view! {
        <div
            class="tabs__tab"
            class:tabs__tab--active=is_active
            title=tab.title.clone()
            on:click=move |_| key.with_value(|k| ctx.activate_tab(k))
        >
            <span class="tabs__title">{title}</span>
            <button class="tabs__close" title="Đóng" on:click=on_close>
                {icon("x")}
            </button>
        </div>
    }
}
