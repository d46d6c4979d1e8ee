use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Centered dialog over a backdrop; Escape and backdrop clicks close it
#[component]
pub fn BaseModal(
    title: &'static str,
    is_open: Signal<bool>,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    #[cfg(not(feature = "ssr"))]
    {
        use leptos::ev::keydown;

        let handle_keydown = window_event_listener(keydown, move |ev| {
            if ev.key() == "Escape" && is_open.with_untracked(|v| *v) {
                on_close.run(());
            }
        });

        on_cleanup(move || drop(handle_keydown));
    }

    view! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center p-4 transition-opacity duration-200"
            class:opacity-0=move || !is_open.get()
            class:pointer-events-none=move || !is_open.get()
            role="dialog"
            aria-modal="true"
        >
            <div class="absolute inset-0 bg-black/40" on:click=move |_| on_close.run(())></div>
            <div class="relative w-full max-w-md card">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="text-lg font-semibold">{title}</h3>
                    <button class="p-1 rounded hover:bg-gray-100" aria-label="Fermer" on:click=move |_| on_close.run(())>
                        <Icon name=icons::X/>
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}

/// Yes/no confirmation built on [`BaseModal`]
#[component]
pub fn ConfirmDialog(
    title: &'static str,
    #[prop(into)]
    message: Signal<String>,
    is_open: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(default = "Confirmer")]
    confirm_text: &'static str,
    /// Use the danger style for the confirm button
    #[prop(default = false)]
    is_destructive: bool,
) -> impl IntoView {
    view! {
        <BaseModal title=title is_open=is_open on_close=on_cancel>
            <div class="space-y-4">
                <p class="text-gray-600">{move || message.get()}</p>
                <div class="flex items-center justify-end gap-2 pt-4 border-t">
                    <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                        "Annuler"
                    </button>
                    <button
                        class=if is_destructive { "btn btn-danger" } else { "btn btn-primary" }
                        on:click=move |_| {
                            on_confirm.run(());
                            on_cancel.run(());
                        }
                    >
                        {confirm_text}
                    </button>
                </div>
            </div>
        </BaseModal>
    }
}
