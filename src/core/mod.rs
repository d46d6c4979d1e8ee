//! Platform-independent client logic: session, API access, routing and
//! navigation state, form validation.
//!
//! Nothing here touches Leptos; the browser-only pieces (`LocalStorage`,
//! `FetchTransport`) sit behind `#[cfg(not(feature = "ssr"))]`.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod nav;
pub mod session;
pub mod storage;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{ApiClient, ApiRequest, AppTransport, Transport};
pub use error::ApiError;
pub use guard::{GuardDecision, RouteGuard};
pub use models::*;
pub use nav::{NavEvent, NavPanels};
pub use session::{Session, SessionStore};
pub use storage::{AppStorage, TokenStorage};
