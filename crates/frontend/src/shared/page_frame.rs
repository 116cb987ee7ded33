//! Root wrapper of every page rendered inside a tab.
//!
//! Sets `id="{entity}--{category}"` (e.g. `"a001_color--list"`) and
//! `data-page-category` on the root element, so a page found in the DOM
//! inspector leads straight to its `domain/` directory.

use leptos::prelude::*;

/// Table with search, filters and pagination
pub const PAGE_CAT_LIST: &str = "list";

/// One record with its nested data
pub const PAGE_CAT_DETAIL: &str = "detail";

#[component]
pub fn PageFrame(
    /// `{entity}--{category}`
    #[prop(into)]
    page_id: String,
    /// One of the PAGE_CAT_* constants
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
