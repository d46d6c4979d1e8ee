use crate::core::validation::ValidationErrors;
use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Field-level message for `field`, read from a shared error map
pub fn field_error(errors: RwSignal<ValidationErrors>, field: &'static str) -> Signal<Option<String>> {
    Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
}

#[component]
fn FieldError(error: Option<Signal<Option<String>>>) -> impl IntoView {
    move || {
        error.and_then(|e| e.get()).map(|err| {
            view! {
                <p class="mt-1 flex items-center gap-1 text-sm text-red-600">
                    <Icon name=icons::ALERT_CIRCLE class="w-4 h-4"/>
                    <span>{err}</span>
                </p>
            }
        })
    }
}

/// Labelled text input bound to a signal
#[component]
pub fn FormField(
    /// Field label text
    label: &'static str,
    /// `id` and `name` of the input
    name: &'static str,
    /// Whether field is required (shows red asterisk)
    #[prop(default = false)]
    required: bool,
    /// Input type (text, password, email, date...)
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = "")]
    placeholder: &'static str,
    #[prop(default = "off")]
    autocomplete: &'static str,
    value: RwSignal<String>,
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
    /// Message shown under the input
    #[prop(optional)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="space-y-1.5">
            <label for=name class="label">
                {label}
                {required.then(|| view! { <span class="text-red-500 ml-0.5">"*"</span> })}
            </label>
            <input
                type=input_type
                id=name
                name=name
                class="input"
                class:border-red-500=move || error.and_then(|e| e.get()).is_some()
                placeholder=placeholder
                autocomplete=autocomplete
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                disabled=move || disabled.get().unwrap_or(false)
            />
            <FieldError error=error/>
        </div>
    }
}

#[component]
pub fn TextAreaField(
    label: &'static str,
    name: &'static str,
    value: RwSignal<String>,
    #[prop(default = 3)]
    rows: u32,
    #[prop(optional)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="space-y-1.5">
            <label for=name class="label">{label}</label>
            <textarea
                id=name
                name=name
                class="input resize-none"
                class:border-red-500=move || error.and_then(|e| e.get()).is_some()
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <FieldError error=error/>
        </div>
    }
}

/// Select bound to a signal holding the option value
#[component]
pub fn SelectField(
    label: &'static str,
    name: &'static str,
    #[prop(default = false)]
    required: bool,
    value: RwSignal<String>,
    /// Options as (value, display_text) pairs
    options: Vec<(&'static str, &'static str)>,
    #[prop(optional)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="space-y-1.5">
            <label for=name class="label">
                {label}
                {required.then(|| view! { <span class="text-red-500 ml-0.5">"*"</span> })}
            </label>
            <select
                id=name
                name=name
                class="input"
                class:border-red-500=move || error.and_then(|e| e.get()).is_some()
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(val, text)| view! { <option value=val>{text}</option> })
                    .collect_view()}
            </select>
            <FieldError error=error/>
        </div>
    }
}
