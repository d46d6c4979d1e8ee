//! Toast notifications
//!
//! API failures and confirmations surface here as short-lived toasts in the
//! top-right corner. The queue is bounded; the oldest toast is dropped first.

use crate::core::ApiError;
use crate::core::error::GENERIC_ERROR_MESSAGE;
use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;
use std::collections::VecDeque;

/// Maximum number of notifications to show at once
const MAX_NOTIFICATIONS: usize = 5;

/// Auto-dismiss delay for toasts
const DISMISS_AFTER_MS: u32 = 4000;

/// Shown after the user signs out from the sidebar
pub const SIGNED_OUT_MESSAGE: &str = "Vous êtes déconnecté";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub auto_dismiss_ms: Option<u32>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            auto_dismiss_ms: Some(DISMISS_AFTER_MS),
        }
    }
}

/// Notification item with unique ID for tracking
#[derive(Clone, Debug)]
pub struct NotificationItem {
    pub id: u64,
    pub notification: Notification,
}

fn push_bounded(queue: &mut VecDeque<NotificationItem>, item: NotificationItem) {
    queue.push_back(item);
    while queue.len() > MAX_NOTIFICATIONS {
        queue.pop_front();
    }
}

/// Shared handle to the toast queue, provided as context
#[derive(Clone, Copy)]
pub struct NotificationManager {
    notifications: RwSignal<VecDeque<NotificationItem>>,
    next_id: RwSignal<u64>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: RwSignal::new(VecDeque::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn notifications(&self) -> RwSignal<VecDeque<NotificationItem>> {
        self.notifications
    }

    pub fn notify(&self, notification: Notification) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.notifications
            .update(|n| push_bounded(n, NotificationItem { id, notification }));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notification::success(message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(Notification::error(message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(Notification::info(message));
    }

    /// Show the backend message of `error`, or `fallback` when it has none
    pub fn api_error(&self, error: &ApiError, fallback: &str) {
        self.error(error.user_message_or(fallback));
    }

    pub fn dismiss(&self, id: u64) {
        self.notifications.update(|n| n.retain(|i| i.id != id));
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_notifications() -> NotificationManager {
    let manager = NotificationManager::new();
    provide_context(manager);
    manager
}

pub fn use_notifications() -> NotificationManager {
    expect_context::<NotificationManager>()
}

/// Toast the error of a failed load each time the resource settles on one
pub fn report_load_error<T>(resource: LocalResource<Result<T, ApiError>>, manager: NotificationManager)
where
    T: Clone + 'static,
{
    Effect::new(move |_| {
        if let Some(Err(e)) = resource.get() {
            manager.api_error(&e, GENERIC_ERROR_MESSAGE);
        }
    });
}

#[component]
pub fn NotificationsContainer() -> impl IntoView {
    let manager = use_notifications();

    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 max-w-sm" aria-live="polite">
            <For
                each=move || manager.notifications().get()
                key=|item| item.id
                children=move |item| view! { <NotificationToast item=item manager=manager/> }
            />
        </div>
    }
}

#[component]
fn NotificationToast(item: NotificationItem, manager: NotificationManager) -> impl IntoView {
    let id = item.id;
    let notification = item.notification;
    let (is_exiting, _set_is_exiting) = signal(false);

    if let Some(_ms) = notification.auto_dismiss_ms {
        #[cfg(not(feature = "ssr"))]
        {
            use gloo_timers::future::TimeoutFuture;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                TimeoutFuture::new(_ms).await;
                _set_is_exiting.set(true);
                // exit animation
                TimeoutFuture::new(300).await;
                manager.dismiss(id);
            });
        }
    }

    let (container_class, icon_class, icon) = match notification.kind {
        NotificationKind::Success => (
            "bg-green-50 border-green-300",
            "text-green-600",
            icons::CHECK_CIRCLE,
        ),
        NotificationKind::Error => ("bg-red-50 border-red-300", "text-red-600", icons::ALERT_CIRCLE),
        NotificationKind::Info => ("bg-blue-50 border-blue-300", "text-blue-600", icons::ALERT_CIRCLE),
    };
    let container_class = format!(
        "flex items-start gap-3 p-4 rounded-lg border shadow-lg transition-all duration-300 {container_class}"
    );

    view! {
        <div
            class=container_class
            role="status"
            style=move || if is_exiting.get() { "opacity: 0; transform: translateX(1rem);" } else { "opacity: 1;" }
        >
            <span class=icon_class><Icon name=icon/></span>
            <p class="flex-1 text-sm text-gray-800">{notification.message}</p>
            <button
                class="text-gray-400 hover:text-gray-700"
                aria-label="Fermer"
                on:click=move |_| manager.dismiss(id)
            >
                <Icon name=icons::X class="w-4 h-4"/>
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64) -> NotificationItem {
        NotificationItem {
            id,
            notification: Notification::info(format!("n{id}")),
        }
    }

    #[test]
    fn test_queue_drops_oldest() {
        let mut queue = VecDeque::new();
        for id in 0..7 {
            push_bounded(&mut queue, item(id));
        }
        assert_eq!(queue.len(), MAX_NOTIFICATIONS);
        assert_eq!(queue.front().map(|i| i.id), Some(2));
        assert_eq!(queue.back().map(|i| i.id), Some(6));
    }

    #[test]
    fn test_constructors_auto_dismiss() {
        let n = Notification::error("Erreur de connexion");
        assert_eq!(n.kind, NotificationKind::Error);
        assert_eq!(n.auto_dismiss_ms, Some(DISMISS_AFTER_MS));

        let n = Notification::info(SIGNED_OUT_MESSAGE);
        assert_eq!(n.kind, NotificationKind::Info);
        assert_eq!(n.message, "Vous êtes déconnecté");
    }
}
