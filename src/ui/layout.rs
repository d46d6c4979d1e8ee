//! Page frames
//!
//! [`AppLayout`] is the signed-in shell (sidebar, header, overlay) around the
//! nested routes. [`PublicLayout`] frames pages reachable without a session and
//! carries the public menu panel.

use leptos::prelude::*;
use leptos_router::components::{A, Outlet};

use crate::core::NavEvent;
use crate::core::guard::LOGIN_PATH;
use crate::ui::guard::ProtectedRoute;
use crate::ui::icon::{Icon, icons};
use crate::ui::nav::use_nav;
use crate::ui::session::use_session;
use crate::ui::sidebar::Sidebar;

#[component]
pub fn AppLayout() -> impl IntoView {
    let nav = use_nav();

    view! {
        <ProtectedRoute>
            <div class="flex h-screen bg-gray-50">
                <Sidebar/>
                <div class="nav-overlay" on:click=move |_| nav.dispatch(NavEvent::AuthOverlay)></div>
                <div class="flex-1 flex flex-col overflow-hidden">
                    <Header/>
                    <main class="flex-1 overflow-y-auto p-6">
                        <Outlet/>
                    </main>
                </div>
            </div>
        </ProtectedRoute>
    }
}

/// Greeting, site and avatar of the signed-in user
#[component]
pub fn Header() -> impl IntoView {
    let session = use_session().session;
    let nav = use_nav();

    let first_name = move || {
        session.with(|s| s.user.as_ref().map(|u| u.first_name.clone()).unwrap_or_default())
    };
    let location = move || {
        session.with(|s| s.user.as_ref().map(|u| u.location.label()).unwrap_or_default())
    };
    let avatar = move || session.with(|s| s.user.as_ref().and_then(|u| u.avatar.clone()));
    let initials = move || session.with(|s| s.user.as_ref().map(|u| u.initials()).unwrap_or_default());

    view! {
        <header class="bg-white border-b px-6 py-4">
            <div class="flex items-center justify-between gap-4">
                <button
                    class="lg:hidden p-2 rounded-lg hover:bg-gray-100"
                    aria-label="Menu"
                    aria-expanded=move || nav.auth_open().to_string()
                    on:click=move |_| nav.dispatch(NavEvent::AuthToggle)
                >
                    <Icon name=icons::MENU/>
                </button>
                <div class="flex-1">
                    <h2 class="text-xl font-semibold">"Bonjour, " {first_name}</h2>
                    <p class="text-sm text-gray-500">{location}</p>
                </div>
                {move || match avatar() {
                    Some(src) => view! {
                        <img src=src alt="" class="w-10 h-10 rounded-full object-cover"/>
                    }
                    .into_any(),
                    None => view! {
                        <div class="w-10 h-10 rounded-full bg-primary-100 flex items-center justify-center">
                            <span class="text-primary-600 font-medium">{initials}</span>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </header>
    }
}

/// Links of the public menu; only routes reachable without a session
const PUBLIC_LINKS: &[(&str, &str)] = &[(LOGIN_PATH, "Connexion")];

#[component]
pub fn PublicLayout(children: Children) -> impl IntoView {
    let nav = use_nav();

    view! {
        <div class="min-h-screen flex flex-col bg-gradient-to-br from-primary-50 to-primary-100">
            <header class="flex items-center justify-between px-6 py-4">
                <span class="text-xl font-bold text-primary-600">"ONG ADJAHI"</span>
                <button
                    class="p-2 rounded-lg hover:bg-white/60"
                    aria-label="Menu"
                    aria-expanded=move || nav.public_open().to_string()
                    on:click=move |_| nav.dispatch(NavEvent::PublicToggle)
                >
                    <Icon name=icons::MENU/>
                </button>
            </header>

            <div class="public-nav-backdrop" on:click=move |_| nav.dispatch(NavEvent::PublicBackdrop)></div>
            <nav class="public-nav-panel">
                {PUBLIC_LINKS
                    .iter()
                    .map(|&(href, label)| {
                        view! {
                            <A href=href on:click=move |_| nav.dispatch(NavEvent::PublicLinkClicked)>
                                {label}
                            </A>
                        }
                    })
                    .collect_view()}
            </nav>

            <main class="flex-1 flex items-center justify-center p-4">{children()}</main>

            <footer class="py-4 text-center text-sm text-gray-600">
                <p>"Grand-Bassam & Bonoua"</p>
                <p class="mt-1">"© 2026 FONDATION ADJAHI"</p>
            </footer>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RouteGuard;

    #[test]
    fn test_public_links_need_no_session() {
        assert!(!PUBLIC_LINKS.is_empty());
        for (href, _) in PUBLIC_LINKS {
            assert!(RouteGuard::is_public(href), "{href} requires a session");
        }
    }
}
