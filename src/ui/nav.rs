//! Navigation panel context
//!
//! Holds the [`NavPanels`] state, closes both panels on Escape and mirrors the
//! state as marker classes on `<body>`.

use leptos::prelude::*;

use crate::core::{NavEvent, NavPanels};

#[derive(Clone, Copy)]
pub struct NavContext {
    pub panels: RwSignal<NavPanels>,
}

impl NavContext {
    pub fn dispatch(&self, event: NavEvent) {
        self.panels.update(|p| p.apply(event));
    }

    pub fn auth_open(&self) -> bool {
        self.panels.with(|p| p.auth_open)
    }

    pub fn public_open(&self) -> bool {
        self.panels.with(|p| p.public_open)
    }
}

pub fn provide_nav_context() -> NavContext {
    let panels = RwSignal::new(NavPanels::new());

    #[cfg(not(feature = "ssr"))]
    {
        use leptos::ev::keydown;

        let handle_keydown = window_event_listener(keydown, move |ev| {
            if ev.key() == "Escape" {
                panels.update(|p| p.apply(NavEvent::Escape));
            }
        });
        on_cleanup(move || drop(handle_keydown));

        Effect::new(move |_| apply_body_classes(&panels.get()));
    }

    let ctx = NavContext { panels };
    provide_context(ctx);
    ctx
}

pub fn use_nav() -> NavContext {
    expect_context::<NavContext>()
}

#[cfg(not(feature = "ssr"))]
fn apply_body_classes(panels: &NavPanels) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };

    let class_list = body.class_list();
    for (class, present) in panels.body_classes() {
        let result = if present {
            class_list.add_1(class)
        } else {
            class_list.remove_1(class)
        };
        if let Err(e) = result {
            leptos::logging::warn!("could not update body class {class}: {e:?}");
        }
    }
}
