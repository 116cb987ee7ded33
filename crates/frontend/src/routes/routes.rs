use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use leptos::prelude::*;

/// Shell with the sidebar and the tab host
#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    // ?active=<tab key> reopens that tab after a reload
    ctx.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

/// The whole client is one screen; tabs stand in for routes.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! { <MainLayout /> }
}
