/// List screen helpers: debounced search box and sortable headers
use contracts::shared::paging::SortSpec;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::shared::config;
use crate::shared::icons::icon;

/// CSS class of the sort indicator
pub fn get_sort_class(sort: &SortSpec, field: &str) -> &'static str {
    if sort.field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Search box that reports its value once typing pauses for `ui.search_debounce_ms`
#[component]
pub fn SearchInput(
    /// Keyword currently applied to the list
    #[prop(into)]
    value: Signal<String>,
    /// Receives the debounced keyword
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Tìm kiếm...".to_string()
    } else {
        placeholder
    };
    let delay_ms = config::current().ui.search_debounce_ms;

    // Text typed so far, ahead of the debounce
    let input_value = RwSignal::new(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        input_value.set(new_value.clone());
        // Replacing the handle drops, and so cancels, the previous timer
        let timer = Timeout::new(delay_ms, move || on_change.run(new_value));
        pending.set_value(Some(timer));
    };

    let clear_filter = move |_| {
        pending.set_value(None);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    // Follow resets done by the list (e.g. "clear filters")
    let applied = Memo::new(move |_| value.get());
    Effect::new(move |_| {
        if applied.get().is_empty() {
            input_value.set(String::new());
        }
    });

    view! {
        <div class="search-input">
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                class:search-input__field--active=move || !value.get().trim().is_empty()
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Xóa">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Clickable column header bound to a list's sort
#[component]
pub fn SortableHeader(
    #[prop(into)]
    label: String,
    /// Wire field sent as `sort=field,dir`
    field: &'static str,
    #[prop(into)]
    sort: Signal<SortSpec>,
    on_sort: Callback<&'static str>,
) -> impl IntoView {
    view! {
        <th
            class="table__header-cell table__header-cell--sortable"
            on:click=move |_| on_sort.run(field)
        >
            {label}
            <span class=move || sort.with(|s| get_sort_class(s, field))>
                {move || sort.with(|s| s.indicator(field))}
            </span>
        </th>
    }
}
