//! Login page
//!
//! Credentials are checked locally first; the API is only called with a
//! well-formed email and a non-empty password. Backend failures are shown as a
//! toast with the backend message.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::core::error::LOGIN_ERROR_MESSAGE;
use crate::core::guard::{HOME_PATH, LOGIN_PATH};
use crate::core::validation::{LoginForm, ValidationErrors};
use crate::core::{GuardDecision, RouteGuard};
use crate::ui::common::{FormField, Spinner, SpinnerSize, field_error};
use crate::ui::layout::PublicLayout;
use crate::ui::notifications::use_notifications;
use crate::ui::session::use_session;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_notifications();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());
    let loading = RwSignal::new(false);

    // Already signed in
    let session = ctx.session;
    let ready = ctx.ready;
    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            if !ready.get() {
                return;
            }
            let decision = RouteGuard::decide(LOGIN_PATH, session.with(|s| s.is_authenticated()));
            if let GuardDecision::Redirect(target) = decision {
                navigate(target, NavigateOptions::default());
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let form = LoginForm::new(email.get_untracked(), password.get_untracked());
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(ValidationErrors::new());
        loading.set(true);

        let client = ctx.client();
        let navigate = navigate.clone();
        spawn_local(async move {
            match client.login(&credentials).await {
                Ok(_) => {
                    toasts.success("Connexion réussie !");
                    navigate(HOME_PATH, NavigateOptions::default());
                }
                Err(e) => toasts.api_error(&e, LOGIN_ERROR_MESSAGE),
            }
            loading.set(false);
        });
    };

    view! {
        <PublicLayout>
            <div class="bg-white rounded-2xl shadow-xl w-full max-w-md p-8">
                <div class="text-center mb-8">
                    <h1 class="text-3xl font-bold text-primary-600 mb-2">"ONG ADJAHI"</h1>
                    <p class="text-gray-600">"Plateforme de Gestion de Santé"</p>
                </div>

                <form on:submit=on_submit class="space-y-6" novalidate=true>
                    <FormField
                        label="Email"
                        name="email"
                        input_type="email"
                        placeholder="votre@email.com"
                        autocomplete="email"
                        value=email
                        error=field_error(errors, "email")
                    />
                    <FormField
                        label="Mot de passe"
                        name="password"
                        input_type="password"
                        placeholder="••••••••"
                        autocomplete="current-password"
                        value=password
                        error=field_error(errors, "password")
                    />

                    <button
                        type="submit"
                        class="btn btn-primary w-full py-3 text-lg disabled:opacity-50 disabled:cursor-not-allowed"
                        disabled=move || loading.get()
                    >
                        {move || {
                            if loading.get() {
                                view! { <Spinner size=SpinnerSize::Small label="Connexion..."/> }.into_any()
                            } else {
                                view! { <span>"Se connecter"</span> }.into_any()
                            }
                        }}
                    </button>
                </form>
            </div>
        </PublicLayout>
    }
}
