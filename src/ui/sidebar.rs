use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::{NavEvent, User};
use crate::ui::icon::{Icon, icons};
use crate::ui::nav::use_nav;
use crate::ui::notifications::{SIGNED_OUT_MESSAGE, use_notifications};
use crate::ui::session::use_session;

const NAV_ITEMS: &[(&str, &str, &str)] = &[
    ("/", "Tableau de bord", icons::DASHBOARD),
    ("/patients", "Patients", icons::USERS),
    ("/cpn", "Suivi CPN", icons::HEART),
    ("/profile", "Profil", icons::USER),
];

/// Navigation of the signed-in area, a slide-out panel on small screens
#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_session();
    let nav = use_nav();
    let toasts = use_notifications();

    let session = ctx.session;

    let full_name = move || {
        session
            .with(|s| s.user.as_ref().map(User::display_name))
            .unwrap_or_default()
    };
    let role = move || {
        session
            .with(|s| s.user.as_ref().map(|u| u.role.label()))
            .unwrap_or_default()
    };

    view! {
        <aside class="sidebar">
            <div class="p-6 border-b">
                <h1 class="text-2xl font-bold text-primary-600">"ONG ADJAHI"</h1>
                <p class="text-sm text-gray-500 mt-1">"Santé Communautaire"</p>
            </div>

            <nav class="flex-1 p-4 space-y-1">
                {NAV_ITEMS
                    .iter()
                    .map(|&(href, label, icon)| {
                        view! {
                            <A href=href exact=true attr:class="sidebar-link">
                                <Icon name=icon/>
                                <span>{label}</span>
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="p-4 border-t">
                <div class="mb-3 p-3 bg-gray-50 rounded-lg">
                    <p class="font-medium text-sm">{full_name}</p>
                    <p class="text-xs text-gray-500">{role}</p>
                </div>
                <button
                    class="flex items-center gap-3 w-full px-4 py-3 text-red-600 hover:bg-red-50 rounded-lg"
                    on:click=move |_| {
                        nav.dispatch(NavEvent::AuthOverlay);
                        ctx.logout();
                        toasts.info(SIGNED_OUT_MESSAGE);
                    }
                >
                    <Icon name=icons::LOGOUT/>
                    <span>"Déconnexion"</span>
                </button>
            </div>
        </aside>
    }
}
