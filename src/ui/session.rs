//! Session context for the component tree
//!
//! One [`SessionStore`] and one [`ApiClient`] are created when the app mounts.
//! The store's subscription mirrors every change into a signal so views follow
//! login, logout and forced sign-outs.

use std::sync::Arc;

use leptos::prelude::*;
#[cfg(not(feature = "ssr"))]
use leptos::task::spawn_local;

use crate::core::config::ClientConfig;
use crate::core::{ApiClient, AppStorage, AppTransport, Session, SessionStore, User};

pub type AppClient = ApiClient<AppTransport, AppStorage>;
pub type AppSessionStore = SessionStore<AppStorage>;

#[derive(Clone)]
pub struct SessionContext {
    /// Mirror of the store, updated by its subscription
    pub session: RwSignal<Session>,
    /// False until persisted tokens have been checked
    pub ready: RwSignal<bool>,
    client: Arc<AppClient>,
}

impl SessionContext {
    pub fn client(&self) -> Arc<AppClient> {
        self.client.clone()
    }

    pub fn store(&self) -> &Arc<AppSessionStore> {
        self.client.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|s| s.user.clone())
    }

    pub fn logout(&self) {
        self.client.logout();
    }
}

/// Create the store and client, and restore a persisted session on the client
pub fn provide_session_context() -> SessionContext {
    let store = Arc::new(SessionStore::new(AppStorage::default()));
    let client = Arc::new(ApiClient::new(
        AppTransport::default(),
        store.clone(),
        ClientConfig::from_build_env(),
    ));

    // Anonymous on both server and client to avoid a hydration mismatch
    let session = RwSignal::new(Session::default());
    let ready = RwSignal::new(false);

    let subscription = store.subscribe(move |snapshot| session.set(snapshot.clone()));
    on_cleanup({
        let store = store.clone();
        move || {
            store.unsubscribe(subscription);
        }
    });

    #[cfg(not(feature = "ssr"))]
    {
        let client = client.clone();
        Effect::new(move |_| {
            if !client.session().restore() {
                ready.set(true);
                return;
            }

            let client = client.clone();
            spawn_local(async move {
                // A rejected token has already cleared the session
                if let Err(e) = client.load_current_user().await {
                    leptos::logging::warn!("could not load current user: {e}");
                }
                ready.set(true);
            });
        });
    }

    let ctx = SessionContext {
        session,
        ready,
        client,
    };
    provide_context(ctx.clone());
    ctx
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
