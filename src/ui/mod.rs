pub mod common;
pub mod guard;
pub mod icon;
pub mod layout;
pub mod nav;
pub mod notifications;
pub mod pages;
pub mod session;
pub mod sidebar;

pub use icon::{Icon, icons};
pub use layout::{AppLayout, PublicLayout};
pub use nav::provide_nav_context;
pub use notifications::{NotificationsContainer, provide_notifications};
pub use session::provide_session_context;
pub use sidebar::Sidebar;
