use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: Signal<String>,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Optional footer with the action buttons (Save, Cancel, etc.)
    #[prop(optional, into)]
    footer: Option<ViewFn>,
    /// Extra class for sizing, e.g. "modal--wide"
    #[prop(optional, into)]
    class: MaybeProp<String>,
    /// Modal content
    children: Children,
) -> impl IntoView {
    // Escape closes; the listener goes away with the modal
    let handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let handle_overlay_click = move |_| {
        on_close.run(());
    };

    // Prevent click propagation from modal content
    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    let modal_class = move || format!("modal {}", class.get().unwrap_or_default());

    view! {
        <div class="modal-overlay" on:click=handle_overlay_click>
            <div class=modal_class on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <div class="modal-header-actions">
                        <button
                            class="button button--icon modal__close"
                            on:click=move |_| on_close.run(())
                        >
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
                {footer.map(|footer| view! { <div class="modal-footer">{footer.run()}</div> })}
            </div>
        </div>
    }
}

/// Yes/no question in a small modal, used before deletes
#[component]
pub fn ConfirmDialog(
    #[prop(into)]
    title: String,
    #[prop(into)]
    message: Signal<String>,
    /// Disables both buttons while the confirmed action runs
    #[prop(into)]
    busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)]
    confirm_label: Option<String>,
) -> impl IntoView {
    let confirm_label = confirm_label.unwrap_or_else(|| "Xóa".to_string());

    view! {
        <Modal
            title=title
            on_close=on_cancel
            class="modal--small"
            footer=move || {
                let confirm_label = confirm_label.clone();
                view! {
                    <button
                        class="button button--secondary"
                        disabled=move || busy.get()
                        on:click=move |_| on_cancel.run(())
                    >
                        "Hủy"
                    </button>
                    <button
                        class="button button--danger"
                        disabled=move || busy.get()
                        on:click=move |_| on_confirm.run(())
                    >
                        {move || if busy.get() { "Đang xử lý...".to_string() } else { confirm_label.clone() }}
                    </button>
                }
            }
        >
            <p class="confirm-dialog__message">{move || message.get()}</p>
        </Modal>
    }
}
