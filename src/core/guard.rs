//! Route guard
//!
//! Decides, for a path and the current authentication state, whether the view
//! renders or the navigation is replaced by a redirect. The guard holds no
//! state of its own; [`RouteGuard::watch`] wires it to a [`SessionStore`] so a
//! logout while a protected page is displayed triggers the redirect without
//! waiting for the next navigation.

use super::session::{SessionStore, SubscriptionId};
use super::storage::TokenStorage;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Routes reachable without a session
const PUBLIC_ROUTES: &[&str] = &[LOGIN_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    /// Replace the current history entry with this path
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn is_public(path: &str) -> bool {
        let path = normalize(path);
        PUBLIC_ROUTES.iter().any(|route| *route == path)
    }

    pub fn requires_auth(path: &str) -> bool {
        !Self::is_public(path)
    }

    /// Protected paths redirect anonymous visitors to the login page. The login
    /// page itself sends an authenticated user to the dashboard.
    pub fn decide(path: &str, is_authenticated: bool) -> GuardDecision {
        match (Self::requires_auth(path), is_authenticated) {
            (true, false) => GuardDecision::Redirect(LOGIN_PATH),
            (false, true) => GuardDecision::Redirect(HOME_PATH),
            _ => GuardDecision::Render,
        }
    }

    /// Re-evaluate the guard on every session change.
    ///
    /// `current_path` is read when the session changes; `redirect` is called
    /// only when the decision is a redirect.
    pub fn watch<S, P, R>(store: &SessionStore<S>, current_path: P, redirect: R) -> SubscriptionId
    where
        S: TokenStorage,
        P: Fn() -> String + Send + Sync + 'static,
        R: Fn(&'static str) + Send + Sync + 'static,
    {
        store.subscribe(move |session| {
            let path = current_path();
            if let GuardDecision::Redirect(target) =
                Self::decide(&path, session.is_authenticated())
            {
                tracing::debug!(from = %path, to = target, "route guard redirect");
                redirect(target);
            }
        })
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => HOME_PATH,
        trimmed => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;
    use crate::core::test_support::sample_user;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_protected_routes_redirect_when_anonymous() {
        for path in ["/", "/patients", "/patients/12", "/cpn", "/cpn/3", "/profile"] {
            assert_eq!(
                RouteGuard::decide(path, false),
                GuardDecision::Redirect(LOGIN_PATH),
                "{path}"
            );
            assert_eq!(RouteGuard::decide(path, true), GuardDecision::Render, "{path}");
        }
    }

    #[test]
    fn test_login_route() {
        assert_eq!(RouteGuard::decide("/login", false), GuardDecision::Render);
        assert_eq!(RouteGuard::decide("/login/", false), GuardDecision::Render);
        assert_eq!(
            RouteGuard::decide("/login?next=/cpn", true),
            GuardDecision::Redirect(HOME_PATH)
        );
    }

    #[test]
    fn test_unknown_paths_are_protected() {
        assert!(RouteGuard::requires_auth("/nowhere"));
        assert!(RouteGuard::requires_auth(""));
        assert!(!RouteGuard::requires_auth("/login#top"));
    }

    #[test]
    fn test_watch_redirects_on_logout() {
        let store = SessionStore::new(MemoryStorage::new());
        store.login(sample_user(), "t1", "t2").unwrap();

        let redirects = Arc::new(Mutex::new(Vec::new()));
        let sink = redirects.clone();
        RouteGuard::watch(
            &store,
            || "/patients".to_string(),
            move |target| sink.lock().unwrap().push(target),
        );

        store.set_user(sample_user());
        assert!(redirects.lock().unwrap().is_empty());

        store.logout();
        assert_eq!(*redirects.lock().unwrap(), vec![LOGIN_PATH]);
    }

    #[test]
    fn test_watch_sends_signed_in_user_home() {
        let store = SessionStore::new(MemoryStorage::new());
        let redirects = Arc::new(Mutex::new(Vec::new()));
        let sink = redirects.clone();
        let id = RouteGuard::watch(
            &store,
            || LOGIN_PATH.to_string(),
            move |target| sink.lock().unwrap().push(target),
        );

        store.login(sample_user(), "t1", "t2").unwrap();
        assert_eq!(*redirects.lock().unwrap(), vec![HOME_PATH]);

        assert!(store.unsubscribe(id));
        store.logout();
        assert_eq!(redirects.lock().unwrap().len(), 1);
    }
}
