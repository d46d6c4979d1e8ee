//! Reusable UI building blocks shared by the pages

pub mod badge;
pub mod form;
pub mod message;
pub mod modal;
pub mod spinner;

pub use badge::{Badge, BadgeVariant, RiskBadge, StatusBadge};
pub use form::{FormField, SelectField, TextAreaField, field_error};
pub use message::EmptyState;
pub use modal::{BaseModal, ConfirmDialog};
pub use spinner::{LoadingScreen, Spinner, SpinnerSize};
