//! Patient record view
//!
//! Shows the identity and medical summary of one patient with the pregnancies
//! attached to them. Deleting asks for confirmation first.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::core::{ApiError, Patient, PregnancyQuery, Session};
use crate::ui::common::{ConfirmDialog, EmptyState, RiskBadge, Spinner, StatusBadge};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::{report_load_error, use_notifications};
use crate::ui::pages::route_id;
use crate::ui::session::use_session;

#[component]
pub fn PatientDetailPage() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_notifications();
    let navigate = use_navigate();
    let id = route_id();

    let patient = LocalResource::new({
        let client = ctx.client();
        move || {
            let client = client.clone();
            let id = id.get();
            async move {
                match id {
                    Some(id) => client.get_patient(id).await,
                    None => Err(ApiError::Http { status: 404 }),
                }
            }
        }
    });
    report_load_error(patient, toasts);

    let confirm_open = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let deleted = RwSignal::new(false);

    Effect::new(move |_| {
        if deleted.get() {
            navigate("/patients", NavigateOptions::default());
        }
    });

    let on_delete = Callback::new({
        let client = ctx.client();
        move |_| {
            let Some(id) = id.get_untracked() else {
                return;
            };
            deleting.set(true);
            let client = client.clone();
            spawn_local(async move {
                match client.delete_patient(id).await {
                    Ok(()) => {
                        toasts.success("Patient supprimé");
                        deleted.set(true);
                    }
                    Err(e) => toasts.api_error(&e, "Suppression impossible"),
                }
                deleting.set(false);
            });
        }
    });

    let confirm_message = Signal::derive(move || {
        let name = patient
            .get()
            .and_then(Result::ok)
            .map(|p| p.display_name())
            .unwrap_or_default();
        format!("Supprimer définitivement le dossier de {name} ?")
    });

    view! {
        <div class="space-y-6">
            <A href="/patients" attr:class="inline-flex items-center gap-1 text-sm text-gray-500 hover:text-gray-800">
                <Icon name=icons::CHEVRON_LEFT class="w-4 h-4"/>
                <span>"Retour aux patients"</span>
            </A>

            <Suspense fallback=|| view! { <Spinner label="Chargement..."/> }>
                {move || patient.get().map(|result| match result {
                    Ok(p) => view! {
                        <PatientCard patient=p deleting=deleting on_delete_click=move || confirm_open.set(true)/>
                    }
                    .into_any(),
                    Err(_) => view! { <EmptyState message="Patient introuvable"/> }.into_any(),
                })}
            </Suspense>

            {move || id.get().map(|id| view! { <PatientPregnancies patient_id=id/> })}

            <ConfirmDialog
                title="Supprimer le patient"
                message=confirm_message
                is_open=confirm_open.into()
                on_confirm=on_delete
                on_cancel=Callback::new(move |_| confirm_open.set(false))
                confirm_text="Supprimer"
                is_destructive=true
            />
        </div>
    }
}

#[component]
fn PatientCard(
    patient: Patient,
    deleting: RwSignal<bool>,
    on_delete_click: impl Fn() + 'static,
) -> impl IntoView {
    let session = use_session().session;
    let can_manage = move || session.with(Session::can_manage_patients);
    let edit_href = format!("/patients/{}/edit", patient.id);
    let birth = patient
        .date_of_birth
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".into());
    let age = patient.age.map(|a| format!("{a} ans")).unwrap_or_default();
    let measures = match (patient.height, patient.weight) {
        (Some(h), Some(w)) => format!("{h} cm, {w} kg"),
        _ => "-".into(),
    };
    let bmi = patient.bmi.map(|b| format!("{b:.1}")).unwrap_or_else(|| "-".into());
    let emergency = if patient.emergency_contact_name.is_empty() {
        "-".to_string()
    } else {
        format!(
            "{} ({}) {}",
            patient.emergency_contact_name, patient.emergency_contact_relation, patient.emergency_contact_phone
        )
    };

    view! {
        <div class="card space-y-6">
            <div class="flex items-start justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold text-gray-900">{patient.display_name()}</h1>
                    <p class="text-sm text-gray-500 font-mono">{patient.patient_id.clone()}</p>
                </div>
                <div class="flex gap-2" class:hidden=move || !can_manage()>
                    <A href=edit_href attr:class="btn btn-secondary flex items-center gap-2">
                        <Icon name=icons::EDIT class="w-4 h-4"/>
                        <span>"Modifier"</span>
                    </A>
                    <button
                        class="btn btn-danger flex items-center gap-2"
                        disabled=move || deleting.get()
                        on:click=move |_| on_delete_click()
                    >
                        <Icon name=icons::TRASH class="w-4 h-4"/>
                        <span>"Supprimer"</span>
                    </button>
                </div>
            </div>

            <dl class="grid grid-cols-1 md:grid-cols-2 gap-x-8 gap-y-4 text-sm">
                <Detail label="Date de naissance" value=format!("{birth} {age}")/>
                <Detail label="Sexe" value=patient.gender.label().to_string()/>
                <Detail label="Téléphone" value=patient.phone.clone()/>
                <Detail label="Email" value=patient.email.clone().unwrap_or_else(|| "-".into())/>
                <Detail label="Adresse" value=format!("{} {}", patient.address, patient.city)/>
                <Detail label="Contact d'urgence" value=emergency/>
                <Detail label="Groupe sanguin" value=patient.blood_group.clone()/>
                <Detail label="Taille et poids" value=measures/>
                <Detail label="IMC" value=bmi/>
                <Detail label="Site d'enregistrement" value=patient.registration_location.clone()/>
            </dl>

            {patient.notes.clone().filter(|n| !n.trim().is_empty()).map(|notes| view! {
                <div>
                    <h2 class="text-sm font-medium text-gray-500 mb-1">"Notes"</h2>
                    <p class="text-sm whitespace-pre-line">{notes}</p>
                </div>
            })}
        </div>
    }
}

#[component]
fn Detail(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div>
            <dt class="text-gray-500">{label}</dt>
            <dd class="font-medium text-gray-900">{if value.trim().is_empty() { "-".to_string() } else { value }}</dd>
        </div>
    }
}

#[component]
fn PatientPregnancies(patient_id: i64) -> impl IntoView {
    let ctx = use_session();
    let pregnancies = LocalResource::new({
        let client = ctx.client();
        move || {
            let client = client.clone();
            let query = PregnancyQuery {
                patient: Some(patient_id),
                ..Default::default()
            };
            async move { client.list_pregnancies(&query).await }
        }
    });

    view! {
        <div class="card">
            <h2 class="text-lg font-semibold mb-4">"Grossesses"</h2>
            <Suspense fallback=|| view! { <Spinner/> }>
                {move || pregnancies.get().map(|result| match result {
                    Ok(list) if !list.is_empty() => view! {
                        <ul class="divide-y">
                            {list
                                .into_iter()
                                .map(|p| {
                                    let href = format!("/cpn/{}", p.id);
                                    view! {
                                        <li class="py-3 flex items-center justify-between text-sm">
                                            <A href=href attr:class="font-medium hover:text-primary-600">
                                                "Grossesse n°" {p.pregnancy_number}
                                            </A>
                                            <div class="flex items-center gap-2">
                                                <StatusBadge status=p.status/>
                                                <RiskBadge risk=p.risk_level/>
                                            </div>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any(),
                    _ => view! { <EmptyState message="Aucune grossesse enregistrée"/> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
