//! Patient list with search and gender filter

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::{Gender, Patient, PatientQuery, Session};
use crate::ui::common::{EmptyState, Spinner};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::{report_load_error, use_notifications};
use crate::ui::session::use_session;

fn gender_filter(value: &str) -> Option<Gender> {
    match value {
        "M" => Some(Gender::Male),
        "F" => Some(Gender::Female),
        _ => None,
    }
}

#[component]
pub fn PatientsPage() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_notifications();
    let session = ctx.session;
    let can_manage = move || session.with(Session::can_manage_patients);

    let search = RwSignal::new(String::new());
    let gender = RwSignal::new(String::new());
    let query = RwSignal::new(PatientQuery::default());

    let patients = LocalResource::new({
        let client = ctx.client();
        move || {
            let client = client.clone();
            let query = query.get();
            async move { client.list_patients(&query).await }
        }
    });
    report_load_error(patients, toasts);

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        query.set(PatientQuery {
            search: Some(search.get_untracked()),
            gender: gender.with_untracked(|g| gender_filter(g)),
            ..Default::default()
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold text-gray-900">"Patients"</h1>
                <div class:hidden=move || !can_manage()>
                    <A href="/patients/new" attr:class="btn btn-primary flex items-center gap-2">
                        <Icon name=icons::PLUS/>
                        <span>"Nouveau patient"</span>
                    </A>
                </div>
            </div>

            <form class="card flex flex-col md:flex-row gap-3" on:submit=on_search>
                <div class="relative flex-1">
                    <span class="absolute left-3 top-1/2 -translate-y-1/2 text-gray-400">
                        <Icon name=icons::SEARCH class="w-4 h-4"/>
                    </span>
                    <input
                        type="search"
                        class="input pl-9"
                        placeholder="Nom, identifiant ou téléphone"
                        prop:value=move || search.get()
                        on:input=move |ev| search.set(event_target_value(&ev))
                    />
                </div>
                <select
                    class="input md:w-48"
                    prop:value=move || gender.get()
                    on:change=move |ev| gender.set(event_target_value(&ev))
                >
                    <option value="">"Tous les sexes"</option>
                    <option value="F">{Gender::Female.label()}</option>
                    <option value="M">{Gender::Male.label()}</option>
                </select>
                <button type="submit" class="btn btn-secondary">"Rechercher"</button>
            </form>

            <div class="card overflow-x-auto">
                <Suspense fallback=|| view! { <Spinner label="Chargement..."/> }>
                    {move || patients.get().map(|result| match result {
                        Ok(list) if list.is_empty() => {
                            view! { <EmptyState message="Aucun patient trouvé"/> }.into_any()
                        }
                        Ok(list) => view! { <PatientTable patients=list/> }.into_any(),
                        Err(_) => view! { <EmptyState message="Impossible de charger les patients"/> }.into_any(),
                    })}
                </Suspense>
            </div>
        </div>
    }
}

#[component]
fn PatientTable(patients: Vec<Patient>) -> impl IntoView {
    view! {
        <table class="w-full text-sm">
            <thead>
                <tr class="text-left text-gray-500 border-b">
                    <th class="py-2 pr-4">"Identifiant"</th>
                    <th class="py-2 pr-4">"Nom"</th>
                    <th class="py-2 pr-4">"Âge"</th>
                    <th class="py-2 pr-4">"Sexe"</th>
                    <th class="py-2 pr-4">"Téléphone"</th>
                    <th class="py-2">"Ville"</th>
                </tr>
            </thead>
            <tbody class="divide-y">
                {patients
                    .into_iter()
                    .map(|p| {
                        let href = format!("/patients/{}", p.id);
                        let name = p.display_name();
                        let age = p.age.map(|a| format!("{a} ans")).unwrap_or_default();
                        view! {
                            <tr class="hover:bg-gray-50">
                                <td class="py-3 pr-4 font-mono text-xs">{p.patient_id}</td>
                                <td class="py-3 pr-4">
                                    <A href=href attr:class="font-medium hover:text-primary-600">{name}</A>
                                </td>
                                <td class="py-3 pr-4">{age}</td>
                                <td class="py-3 pr-4">{p.gender.label()}</td>
                                <td class="py-3 pr-4">{p.phone}</td>
                                <td class="py-3">{p.city}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_filter() {
        assert_eq!(gender_filter("F"), Some(Gender::Female));
        assert_eq!(gender_filter("M"), Some(Gender::Male));
        assert_eq!(gender_filter(""), None);
    }
}
