//! Non-blocking toast notifications.
//!
//! [`ToastQueue`] is plain data; [`Notifier`] wraps it in a signal, schedules
//! auto-dismiss and is provided to the whole app through context.

use contracts::shared::error::ApiError;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use uuid::Uuid;

use crate::shared::icons::icon;

/// Older toasts are dropped beyond this many
pub const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Info => "toast toast--info",
            ToastKind::Warning => "toast toast--warning",
            ToastKind::Error => "toast toast--error",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            ToastKind::Success => "check",
            ToastKind::Info => "info",
            ToastKind::Warning => "alert-triangle",
            ToastKind::Error => "x-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    /// False when the toast is already gone
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// User-facing text for a failed action, e.g. "Lưu thất bại: Tên màu đã tồn tại"
pub fn failure_message(action: &str, err: &ApiError) -> String {
    format!("{} thất bại: {}", action, err)
}

// ============================================================================
// Reactive service
// ============================================================================

#[derive(Clone, Copy)]
pub struct Notifier {
    pub queue: RwSignal<ToastQueue>,
    timeout_ms: u32,
}

impl Notifier {
    /// `timeout_ms == 0` keeps toasts until dismissed by hand
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
            timeout_ms,
        }
    }

    pub fn notify(&self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        match kind {
            ToastKind::Error => log::error!("{}", message),
            ToastKind::Warning => log::warn!("{}", message),
            ToastKind::Success | ToastKind::Info => log::info!("{}", message),
        }
        let mut id = None;
        self.queue.update(|queue| id = Some(queue.push(kind, message)));
        if let (Some(id), true) = (id, self.timeout_ms > 0) {
            let queue = self.queue;
            Timeout::new(self.timeout_ms, move || {
                // The owner may be gone by now
                let _ = queue.try_update(|q| q.dismiss(id));
            })
            .forget();
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(ToastKind::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(ToastKind::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(ToastKind::Error, message);
    }

    pub fn api_error(&self, action: &str, err: &ApiError) {
        self.error(failure_message(action, err));
    }

    pub fn dismiss(&self, id: Uuid) {
        self.queue.update(|queue| {
            queue.dismiss(id);
        });
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier not found in context")
}

/// Renders the toast stack in the bottom-right corner
#[component]
pub fn ToastHost() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="toast-host">
            <For
                each=move || notifier.queue.with(|queue| queue.items().to_vec())
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() role="status">
                            {icon(toast.kind.icon_name())}
                            <span class="toast__message">{toast.message}</span>
                            <button
                                class="button button--icon toast__close"
                                title="Đóng"
                                on:click=move |_| notifier.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Success, "Thêm màu sắc thành công");
        let second = queue.push(ToastKind::Error, "Lỗi");
        assert_eq!(queue.items().len(), 2);
        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.items()[0].id, second);
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut queue = ToastQueue::default();
        for i in 0..MAX_VISIBLE + 2 {
            queue.push(ToastKind::Info, format!("#{}", i));
        }
        assert_eq!(queue.items().len(), MAX_VISIBLE);
        assert_eq!(queue.items()[0].message, "#2");
    }

    #[test]
    fn test_failure_message() {
        let err = ApiError::Conflict("Tên màu đã tồn tại".to_string());
        assert_eq!(failure_message("Lưu", &err), "Lưu thất bại: Tên màu đã tồn tại");
    }
}
