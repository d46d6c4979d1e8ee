//! Slide-out navigation panels
//!
//! Two independent open/closed panels: the sidebar of the signed-in area and
//! the menu of the public pages. Each one is mirrored as a marker class on the
//! document body.

/// Body class present while the signed-in sidebar is open
pub const AUTH_NAV_CLASS: &str = "nav-open";
/// Body class present while the public menu is open
pub const PUBLIC_NAV_CLASS: &str = "public-nav-open";

/// UI events the panels react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    AuthToggle,
    AuthOverlay,
    PublicToggle,
    PublicBackdrop,
    /// A link inside the public menu was followed
    PublicLinkClicked,
    Escape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavPanels {
    pub auth_open: bool,
    pub public_open: bool,
}

impl NavPanels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: NavEvent) {
        match event {
            NavEvent::AuthToggle => self.auth_open = !self.auth_open,
            NavEvent::AuthOverlay => self.auth_open = false,
            NavEvent::PublicToggle => self.public_open = !self.public_open,
            NavEvent::PublicBackdrop | NavEvent::PublicLinkClicked => self.public_open = false,
            NavEvent::Escape => *self = Self::default(),
        }
    }

    /// Consuming form of [`apply`](Self::apply)
    pub fn after(mut self, event: NavEvent) -> Self {
        self.apply(event);
        self
    }

    /// `(class, present)` for each body marker class
    pub fn body_classes(&self) -> [(&'static str, bool); 2] {
        [
            (AUTH_NAV_CLASS, self.auth_open),
            (PUBLIC_NAV_CLASS, self.public_open),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panels(auth_open: bool, public_open: bool) -> NavPanels {
        NavPanels {
            auth_open,
            public_open,
        }
    }

    #[test]
    fn test_initially_closed() {
        assert_eq!(NavPanels::new(), panels(false, false));
    }

    #[test]
    fn test_escape_closes_both() {
        assert_eq!(panels(true, true).after(NavEvent::Escape), panels(false, false));
        assert_eq!(panels(false, false).after(NavEvent::Escape), panels(false, false));
    }

    #[test]
    fn test_overlay_only_closes_auth_panel() {
        assert_eq!(panels(true, true).after(NavEvent::AuthOverlay), panels(false, true));
        assert_eq!(panels(true, false).after(NavEvent::AuthOverlay), panels(false, false));
    }

    #[test]
    fn test_toggles_are_independent() {
        let nav = NavPanels::new()
            .after(NavEvent::AuthToggle)
            .after(NavEvent::PublicToggle);
        assert_eq!(nav, panels(true, true));

        let nav = nav.after(NavEvent::AuthToggle);
        assert_eq!(nav, panels(false, true));
    }

    #[test]
    fn test_public_link_closes_public_panel() {
        assert_eq!(
            panels(true, true).after(NavEvent::PublicLinkClicked),
            panels(true, false)
        );
        assert_eq!(
            panels(false, true).after(NavEvent::PublicBackdrop),
            panels(false, false)
        );
    }

    #[test]
    fn test_body_classes() {
        assert_eq!(
            panels(true, false).body_classes(),
            [("nav-open", true), ("public-nav-open", false)]
        );
    }
}
