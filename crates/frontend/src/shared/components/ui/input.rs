use leptos::prelude::*;

use super::field::Field;

/// Single-line field bound to a form value.
///
/// Number inputs accept any step, so prices and percentages with decimals are
/// left to the validator instead of the browser.
#[component]
pub fn Input(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    /// Marks the field as touched
    #[prop(optional)]
    on_blur: Option<Callback<()>>,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    /// "text" when absent
    #[prop(optional, into)]
    input_type: MaybeProp<String>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional)]
    required: bool,
    #[prop(optional, into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    let kind = move || input_type.get().unwrap_or_else(|| "text".to_string());
    let step = move || (kind() == "number").then_some("any");

    view! {
        <Field label=label required=required error=error>
            <input
                class="form__input"
                class:form__input--invalid=move || error.with(|e| e.is_some())
                type=kind
                step=step
                prop:value=move || value.get()
                placeholder=move || placeholder.get().unwrap_or_default()
                disabled=move || disabled.get()
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
        </Field>
    }
}
