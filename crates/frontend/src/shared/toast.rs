use leptos::prelude::*;

/// How long a toast stays on screen
const TOAST_TIMEOUT_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastIntent {
    Success,
    Error,
}

impl ToastIntent {
    fn class(&self) -> &'static str {
        match self {
            ToastIntent::Success => "toast toast--success",
            ToastIntent::Error => "toast toast--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: u64,
    pub intent: ToastIntent,
    pub text: String,
}

/// Transient, non-blocking notifications
///
/// Usage:
/// ```rust,no_run
/// # use frontend::shared::toast::use_toast;
/// let toast = use_toast();
/// toast.error("Erro ao buscar os produtos.");
/// ```
#[derive(Clone, Copy)]
pub struct ToastService {
    messages: RwSignal<Vec<ToastMessage>>,
    next_id: StoredValue<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            messages: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    /// Show a message; it is dismissed automatically after a few seconds
    pub fn push(&self, intent: ToastIntent, text: impl Into<String>) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        let text = text.into();
        log::debug!("toast #{} {:?}: {}", id, intent, text);
        self.messages
            .update(|list| list.push(ToastMessage { id, intent, text }));

        let service = *self;
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
            service.dismiss(id);
        });

        id
    }

    pub fn success(&self, text: impl Into<String>) -> u64 {
        self.push(ToastIntent::Success, text)
    }

    pub fn error(&self, text: impl Into<String>) -> u64 {
        self.push(ToastIntent::Error, text)
    }

    pub fn dismiss(&self, id: u64) {
        self.messages.update(|list| list.retain(|m| m.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}

/// Fixed container rendering the active toasts. Mount once, near the root.
#[component]
pub fn ToastContainer() -> impl IntoView {
    let toast = use_toast();

    view! {
        <div class="toast-container" role="status">
            <For
                each=move || toast.messages.get()
                key=|m| m.id
                children=move |m: ToastMessage| {
                    let id = m.id;
                    view! {
                        <div class=m.intent.class() on:click=move |_| toast.dismiss(id)>
                            {m.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
