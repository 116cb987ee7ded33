use leptos::prelude::*;

/// Label, control and validation message of one form field
#[component]
pub fn Field(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    /// Adds the `*` marker; the rule itself lives in the form validator
    #[prop(optional)]
    required: bool,
    #[prop(optional, into)]
    error: Signal<Option<String>>,
    /// Spans both columns of a two-column form
    #[prop(optional)]
    wide: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="form__group" class:form__group--full=wide>
            {move || label.get().map(|l| view! {
                <label class="form__label">
                    {l}
                    {required.then(|| view! { <span class="form__required">" *"</span> })}
                </label>
            })}
            {children()}
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
        </div>
    }
}
