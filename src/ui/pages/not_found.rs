//! 404 page

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::icon::{Icon, icons};

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="py-16 flex flex-col items-center justify-center text-center">
            <div class="w-20 h-20 mb-6 bg-gray-100 rounded-full flex items-center justify-center">
                <Icon name=icons::WARNING class="w-10 h-10 text-gray-400"/>
            </div>
            <h1 class="text-6xl font-bold text-gray-900 mb-4">"404"</h1>
            <h2 class="text-2xl font-semibold text-gray-800 mb-2">"Page introuvable"</h2>
            <p class="text-gray-500 mb-8 max-w-md">
                "La page demandée n'existe pas ou a été déplacée."
            </p>
            <A href="/" attr:class="btn btn-primary">"Retour au tableau de bord"</A>
        </div>
    }
}
