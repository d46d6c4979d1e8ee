//! Route guard component
//!
//! Wraps the signed-in area. The first decision is taken once the persisted
//! session has been checked; afterwards the store subscription installed by
//! [`RouteGuard::watch`] reports sign-outs (explicit or forced by a 401) and
//! the pending redirect is applied.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::core::{GuardDecision, RouteGuard, Session};
use crate::ui::common::LoadingScreen;
use crate::ui::session::use_session;

#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let ctx = use_session();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    let pending_redirect = RwSignal::new(None::<&'static str>);
    let subscription = RouteGuard::watch(
        ctx.store(),
        move || pathname.get_untracked(),
        move |target| pending_redirect.set(Some(target)),
    );
    on_cleanup({
        let store = ctx.store().clone();
        move || {
            store.unsubscribe(subscription);
        }
    });

    let session = ctx.session;
    let ready = ctx.ready;
    Effect::new(move |_| {
        if !ready.get() {
            return;
        }
        let target = pending_redirect.get().or_else(|| {
            let decision = RouteGuard::decide(
                &pathname.get_untracked(),
                session.with_untracked(Session::is_authenticated),
            );
            match decision {
                GuardDecision::Redirect(target) => Some(target),
                GuardDecision::Render => None,
            }
        });
        if let Some(target) = target {
            navigate(
                target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    view! {
        <Show
            when=move || ready.get() && session.with(Session::is_authenticated)
            fallback=|| view! { <LoadingScreen/> }
        >
            {children()}
        </Show>
    }
}
