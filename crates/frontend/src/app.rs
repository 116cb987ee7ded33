use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::config;
use crate::shared::notifications::{Notifier, ToastHost};
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    let config = config::current();

    provide_context(AppGlobalContext::new());
    provide_context(Notifier::new(config.ui.toast_timeout_ms));

    view! {
        <ConfigProvider>
            <AppRoutes />
            <ToastHost />
        </ConfigProvider>
    }
}
