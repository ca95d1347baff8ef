//! Transient notifications shown in the corner of the window.

use std::time::Duration;

use dioxus::prelude::*;

const TOAST_TTL: Duration = Duration::from_secs(4);
const MAX_VISIBLE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Ordered message list; the oldest entries fall off past `MAX_VISIBLE`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
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

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    #[must_use]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Signal-backed handle shared through context.
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: Signal<ToastQueue>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.queue.write().dismiss(id);
    }

    fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        let id = self.queue.write().push(kind, message);
        let mut handle = *self;
        spawn(async move {
            tokio::time::sleep(TOAST_TTL).await;
            handle.dismiss(id);
        });
    }
}

/// Install the toast list for the subtree. Call once near the root.
pub fn use_toast_provider() -> Toasts {
    use_context_provider(|| Toasts {
        queue: Signal::new(ToastQueue::default()),
    })
}

#[must_use]
pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

#[component]
pub fn ToastList() -> Element {
    let toasts = use_toasts();
    let items = toasts.queue.read().items().to_vec();

    rsx! {
        div { class: "toasts",
            for toast in items {
                div {
                    key: "{toast.id}",
                    class: toast.kind.class(),
                    role: "status",
                    span { "{toast.message}" }
                    button {
                        class: "toast-close",
                        r#type: "button",
                        onclick: move |_| {
                            let mut toasts = toasts;
                            toasts.dismiss(toast.id);
                        },
                        "×"
                    }
                }
            }
        }
    }
}
