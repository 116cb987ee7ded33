use crate::layout::center::tabs::tab::Tab as TabComponent;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::tabs::TabPage;
use leptos::prelude::*;

/// Tab bar plus the content of every open tab; inactive tabs stay mounted
#[component]
pub fn Tabs() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let is_empty = move || ctx.opened.with(|tabs| tabs.is_empty());

    view! {
        <div class="tabs">
            <div class="tabs__bar">
                <For
                    each=move || ctx.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabComponent tab=tab /> }
                />
            </div>
            <div class="tabs__content">
                <Show when=is_empty>
                    <div class="tabs__empty">"Chọn một mục trong menu để bắt đầu"</div>
                </Show>
                <For
                    each=move || ctx.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab: TabData| view! { <TabPage tab=tab tabs_store=ctx /> }
                />
            </div>
        </div>
    }
}
