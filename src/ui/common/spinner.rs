use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "w-4 h-4",
            SpinnerSize::Medium => "w-6 h-6",
            SpinnerSize::Large => "w-10 h-10",
        }
    }
}

/// Rotating loader with an optional label
#[component]
pub fn Spinner(
    #[prop(default = SpinnerSize::Medium)]
    size: SpinnerSize,
    #[prop(default = "")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <span class="inline-flex items-center gap-2 text-gray-500">
            <span class=format!("animate-spin {}", size.class())>
                <Icon name=icons::LOADER class="w-full h-full"/>
            </span>
            {(!label.is_empty()).then(|| view! { <span class="text-sm">{label}</span> })}
        </span>
    }
}

/// Full-page loader shown while the session is being restored
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <Spinner size=SpinnerSize::Large label="Chargement..."/>
        </div>
    }
}
