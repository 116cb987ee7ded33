use crate::shared::icons::icon;
use contracts::shared::paging::page_window;
use leptos::prelude::*;

/// PaginationControls component - pager under every list table
///
/// First/prev/next/last buttons, a sliding window of page numbers around the
/// current page, the "showing x - y / n" label and the page size selector.
#[component]
pub fn PaginationControls(
    /// Current page (0-indexed)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,

    /// "Hiển thị 1 - 10 / 42"
    #[prop(into)]
    range_label: Signal<String>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<usize>,

    /// Callback when page changes
    on_page_change: Callback<usize>,

    /// Callback when page size changes
    on_page_size_change: Callback<usize>,

    /// Available page size options
    page_size_options: Vec<usize>,
) -> impl IntoView {
    let is_first = move || current_page.get() == 0;
    let is_last = move || current_page.get() + 1 >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <span class="pagination-info">{move || range_label.get()}</span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=is_first
                title="Trang đầu"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 0 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=is_first
                title="Trang trước"
            >
                {icon("chevron-left")}
            </button>
            {move || {
                let current = current_page.get();
                page_window(current, total_pages.get())
                    .into_iter()
                    .map(|page| {
                        view! {
                            <button
                                class="pagination-btn pagination-btn--number"
                                class:pagination-btn--active=page == current
                                on:click=move |_| on_page_change.run(page)
                            >
                                {page + 1}
                            </button>
                        }
                    })
                    .collect_view()
            }}
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page + 1 < total_pages.get() {
                        on_page_change.run(page + 1);
                    }
                }
                disabled=is_last
                title="Trang sau"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let total = total_pages.get();
                    if total > 0 {
                        on_page_change.run(total - 1);
                    }
                }
                disabled=is_last
                title="Trang cuối"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options.into_iter().map(|size| {
                    view! {
                        <option value=size.to_string() selected=move || page_size.get() == size>
                            {format!("{} / trang", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
