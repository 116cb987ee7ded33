//! Top bar: navigation toggle, application title and the API the client talks to.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::api_utils::api_base;
use crate::shared::icons::icon;
use leptos::prelude::*;

pub const APP_TITLE: &str = "Quản lý cửa hàng mũ bảo hiểm";

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let is_sidebar_visible = move || ctx.left_open.get();
    let api = api_base();

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ẩn menu" } else { "Hiện menu" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                {icon("helmet")}
                <span class="top-header__title">{APP_TITLE}</span>
            </div>
            <div class="top-header__actions">
                <span class="top-header__api" title="Máy chủ API">{api}</span>
                <button
                    class="top-header__icon-btn"
                    title="Đóng tất cả tab"
                    on:click=move |_| ctx.close_all()
                >
                    {icon("x")}
                </button>
            </div>
        </header>
    }
}
