use leptos::prelude::*;

/// Checkbox inside its own label, so the whole line toggles it
#[component]
pub fn Checkbox(
    #[prop(into)]
    label: Signal<String>,
    #[prop(into)]
    checked: Signal<bool>,
    /// Receives the new state
    #[prop(optional)]
    on_change: Option<Callback<bool>>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <label class="form__check" class:form__check--disabled=move || disabled.get()>
            <input
                type="checkbox"
                class="form__check-input"
                prop:checked=move || checked.get()
                disabled=move || disabled.get()
                on:change=move |ev| {
                    if let Some(on_change) = on_change {
                        on_change.run(event_target_checked(&ev));
                    }
                }
            />
            <span class="form__check-label">{move || label.get()}</span>
        </label>
    }
}
