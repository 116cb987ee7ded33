use leptos::prelude::*;

use super::field::Field;

/// Drop-down over `(value, label)` pairs
#[component]
pub fn Select(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    /// Leading option with an empty value, e.g. "-- Chọn nhà sản xuất --"
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional)]
    required: bool,
    #[prop(optional, into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Field label=label required=required error=error>
            <select
                class="form__select"
                class:form__input--invalid=move || error.with(|e| e.is_some())
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:change=move |ev| {
                    if let Some(on_change) = on_change {
                        on_change.run(event_target_value(&ev));
                    }
                }
            >
                {move || placeholder.get().map(|p| view! {
                    <option value="" selected=move || value.with(|v| v.is_empty())>{p}</option>
                })}
                // Options may arrive after the value (lookups load async)
                {move || options.get().into_iter().map(|(option, text)| {
                    let selected = {
                        let option = option.clone();
                        move || value.with(|v| *v == option)
                    };
                    view! { <option value=option selected=selected>{text}</option> }
                }).collect_view()}
            </select>
        </Field>
    }
}
