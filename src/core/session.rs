//! Authenticated session store
//!
//! Holds the current user and token pair, persists the tokens through a
//! [`TokenStorage`], and notifies subscribers after every change. The store is
//! an explicit object created at application start and injected where needed.
//!
//! Tokens are trusted until the backend rejects them: there is no expiry check
//! and no automatic rotation here.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::error::ApiError;
use super::models::User;
use super::storage::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStorage};

/// Snapshot of the authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Session {
    /// True iff an access token is present
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Tokens restored from storage but the user not loaded yet
    pub fn needs_user(&self) -> bool {
        self.is_authenticated() && self.user.is_none()
    }

    /// Whether the signed-in role may create, edit and delete patients
    pub fn can_manage_patients(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.role.can_manage_patients())
    }
}

/// Handle returned by [`SessionStore::subscribe`]
pub type SubscriptionId = u64;

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

struct Inner {
    session: Session,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
}

/// Owner of the [`Session`]
pub struct SessionStore<S: TokenStorage> {
    storage: S,
    inner: Mutex<Inner>,
}

impl<S: TokenStorage> SessionStore<S> {
    /// Create an empty store; call [`restore`](Self::restore) to reload tokens
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            inner: Mutex::new(Inner {
                session: Session::default(),
                listeners: Vec::new(),
                next_id: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current session snapshot
    pub fn snapshot(&self) -> Session {
        self.lock().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.lock().session.user.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.lock().session.access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.lock().session.refresh_token.clone()
    }

    /// Reload persisted tokens. Returns whether an access token was found.
    ///
    /// The user is left empty; the caller fetches it from the backend.
    pub fn restore(&self) -> bool {
        let access_token = self.storage.get(ACCESS_TOKEN_KEY);
        let refresh_token = self.storage.get(REFRESH_TOKEN_KEY);
        let restored = access_token.is_some();

        self.update(|session| {
            *session = Session {
                user: None,
                access_token,
                refresh_token,
            };
        });

        tracing::debug!(restored, "session restored from storage");
        restored
    }

    /// Replace the session and persist both tokens.
    ///
    /// In-memory state is updated even when persisting fails; the storage
    /// error is still returned.
    pub fn login(
        &self,
        user: User,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Result<(), ApiError> {
        let access_token = access_token.into();
        let refresh_token = refresh_token.into();
        let user_id = user.id;

        let persisted = self
            .storage
            .set(ACCESS_TOKEN_KEY, &access_token)
            .and_then(|()| self.storage.set(REFRESH_TOKEN_KEY, &refresh_token));

        self.update(|session| {
            *session = Session {
                user: Some(user),
                access_token: Some(access_token),
                refresh_token: Some(refresh_token),
            };
        });

        tracing::info!(user_id, "signed in");
        persisted.map_err(ApiError::Storage)
    }

    /// Clear the session and remove both persisted tokens
    pub fn logout(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove persisted token");
            }
        }
        self.update(|session| *session = Session::default());
        tracing::info!("signed out");
    }

    /// Store the user loaded after a restore or a profile update
    pub fn set_user(&self, user: User) {
        self.update(|session| session.user = Some(user));
    }

    /// Replace the access token after a refresh, keeping the user
    pub fn set_access_token(&self, access_token: impl Into<String>) -> Result<(), ApiError> {
        let access_token = access_token.into();
        let persisted = self.storage.set(ACCESS_TOKEN_KEY, &access_token);
        self.update(|session| session.access_token = Some(access_token));
        persisted.map_err(ApiError::Storage)
    }

    /// Replace the refresh token when the backend rotates it
    pub fn set_refresh_token(&self, refresh_token: impl Into<String>) -> Result<(), ApiError> {
        let refresh_token = refresh_token.into();
        let persisted = self.storage.set(REFRESH_TOKEN_KEY, &refresh_token);
        self.update(|session| session.refresh_token = Some(refresh_token));
        persisted.map_err(ApiError::Storage)
    }

    /// Register a listener called with the new session after every change
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(lid, _)| *lid != id);
        inner.listeners.len() != before
    }

    /// Listeners run after the lock is released so they may read the store
    fn update(&self, mutate: impl FnOnce(&mut Session)) {
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            mutate(&mut inner.session);
            let listeners: Vec<Listener> =
                inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (inner.session.clone(), listeners)
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl<S: TokenStorage + Default> Default for SessionStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
