use leptos::prelude::*;

use super::field::Field;

/// Inline choice between a few fixed values, e.g. gender "Nam" / "Nữ"
#[component]
pub fn RadioGroup(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    on_change: Option<Callback<String>>,
    /// HTML name shared by the radios; unique per form
    #[prop(into)]
    name: String,
    options: Vec<(&'static str, &'static str)>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let radios = options
        .into_iter()
        .map(|(option, text)| {
            view! {
                <label class="form__radio" class:form__radio--disabled=move || disabled.get()>
                    <input
                        type="radio"
                        class="form__radio-input"
                        name=name.clone()
                        value=option
                        prop:checked=move || value.with(|v| v == option)
                        disabled=move || disabled.get()
                        on:change=move |_| {
                            if let Some(on_change) = on_change {
                                on_change.run(option.to_string());
                            }
                        }
                    />
                    <span>{text}</span>
                </label>
            }
        })
        .collect_view();

    view! {
        <Field label=label>
            <div class="form__radio-group">{radios}</div>
        </Field>
    }
}
