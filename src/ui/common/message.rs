use leptos::prelude::*;

/// Placeholder for empty lists
#[component]
pub fn EmptyState(message: &'static str) -> impl IntoView {
    view! { <p class="py-8 text-center text-sm text-gray-500">{message}</p> }
}
