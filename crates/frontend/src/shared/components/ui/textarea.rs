use leptos::prelude::*;

use super::field::Field;

/// Multi-line field of a modal form.
///
/// With `max_len` a "used / max" counter follows the text; the limit itself
/// is enforced by the form validator.
#[component]
pub fn Textarea(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    #[prop(optional)]
    on_blur: Option<Callback<()>>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// Visible lines, 3 by default
    #[prop(optional)]
    rows: Option<u32>,
    #[prop(optional)]
    max_len: Option<usize>,
    #[prop(optional, into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    let counter = max_len.map(|max| {
        let used = move || value.with(|v| v.chars().count());
        view! {
            <span class="form__counter" class:form__counter--over=move || { used() > max }>
                {move || format!("{}/{}", used(), max)}
            </span>
        }
    });

    view! {
        <Field label=label error=error wide=true>
            <textarea
                class="form__textarea"
                class:form__input--invalid=move || error.with(|e| e.is_some())
                placeholder=move || placeholder.get().unwrap_or_default()
                disabled=move || disabled.get()
                rows=rows.unwrap_or(3)
                prop:value=move || value.get()
                on:input=move |ev| {
                    if let Some(on_input) = on_input {
                        on_input.run(event_target_value(&ev));
                    }
                }
                on:blur=move |_| {
                    if let Some(on_blur) = on_blur {
                        on_blur.run(());
                    }
                }
            />
            {counter}
        </Field>
    }
}
