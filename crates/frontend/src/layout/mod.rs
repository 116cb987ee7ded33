pub mod center;
pub mod global_context;
pub mod left;
pub mod tabs;
pub mod top_header;

use leptos::prelude::*;
use top_header::TopHeader;

/// Application shell.
///
/// ```text
/// +------------------------------------+
/// |             TopHeader              |
/// +------------------------------------+
/// |  Sidebar  |   Tabs + tab content   |
/// |  (Left)   |       (Center)         |
/// +------------------------------------+
/// ```
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                // hidden through ctx.left_open
                <left::Left>
                    {left()}
                </left::Left>
                <div class="app-main">
                    <center::Center>
                        {center()}
                    </center::Center>
                </div>
            </div>
        </div>
    }
}
