//! Patient create and edit form
//!
//! `/patients/new` creates a record, `/patients/:id/edit` loads the record
//! first and sends a full update. Field errors are shown under each input and
//! nothing is sent while the form is invalid.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::core::validation::{PatientForm, ValidationErrors};
use crate::core::Patient;
use crate::ui::common::{FormField, SelectField, Spinner, SpinnerSize, TextAreaField, field_error};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;
use crate::ui::pages::route_id;
use crate::ui::session::use_session;

const GENDER_OPTIONS: &[(&str, &str)] = &[("", "Sélectionner"), ("F", "Féminin"), ("M", "Masculin")];

const BLOOD_GROUP_OPTIONS: &[(&str, &str)] = &[
    ("UNKNOWN", "Inconnu"),
    ("A+", "A+"),
    ("A-", "A-"),
    ("B+", "B+"),
    ("B-", "B-"),
    ("AB+", "AB+"),
    ("AB-", "AB-"),
    ("O+", "O+"),
    ("O-", "O-"),
];

const MARITAL_STATUS_OPTIONS: &[(&str, &str)] = &[
    ("SINGLE", "Célibataire"),
    ("MARRIED", "Marié(e)"),
    ("DIVORCED", "Divorcé(e)"),
    ("WIDOWED", "Veuf/Veuve"),
];

const LOCATION_OPTIONS: &[(&str, &str)] = &[("Grand-Bassam", "Grand-Bassam"), ("Bonoua", "Bonoua")];

/// Form content prefilled from an existing record
fn form_from_patient(patient: &Patient) -> PatientForm {
    let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
    PatientForm {
        first_name: patient.first_name.clone(),
        last_name: patient.last_name.clone(),
        date_of_birth: patient
            .date_of_birth
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        gender: patient.gender.code().to_string(),
        phone: patient.phone.clone(),
        email: patient.email.clone().unwrap_or_default(),
        address: patient.address.clone(),
        city: patient.city.clone(),
        emergency_contact_name: patient.emergency_contact_name.clone(),
        emergency_contact_phone: patient.emergency_contact_phone.clone(),
        emergency_contact_relation: patient.emergency_contact_relation.clone(),
        blood_group: patient.blood_group.clone(),
        height: number(patient.height),
        weight: number(patient.weight),
        marital_status: patient.marital_status.clone(),
        occupation: patient.occupation.clone().unwrap_or_default(),
        registration_location: patient.registration_location.clone(),
        notes: patient.notes.clone().unwrap_or_default(),
    }
}

/// Defaults for a new record
fn blank_form() -> PatientForm {
    PatientForm {
        city: "Grand-Bassam".into(),
        blood_group: "UNKNOWN".into(),
        marital_status: "SINGLE".into(),
        registration_location: "Grand-Bassam".into(),
        ..Default::default()
    }
}

/// One signal per input
#[derive(Clone, Copy)]
struct PatientFields {
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    date_of_birth: RwSignal<String>,
    gender: RwSignal<String>,
    phone: RwSignal<String>,
    email: RwSignal<String>,
    address: RwSignal<String>,
    city: RwSignal<String>,
    emergency_contact_name: RwSignal<String>,
    emergency_contact_phone: RwSignal<String>,
    emergency_contact_relation: RwSignal<String>,
    blood_group: RwSignal<String>,
    height: RwSignal<String>,
    weight: RwSignal<String>,
    marital_status: RwSignal<String>,
    occupation: RwSignal<String>,
    registration_location: RwSignal<String>,
    notes: RwSignal<String>,
}

impl PatientFields {
    fn new(form: PatientForm) -> Self {
        Self {
            first_name: RwSignal::new(form.first_name),
            last_name: RwSignal::new(form.last_name),
            date_of_birth: RwSignal::new(form.date_of_birth),
            gender: RwSignal::new(form.gender),
            phone: RwSignal::new(form.phone),
            email: RwSignal::new(form.email),
            address: RwSignal::new(form.address),
            city: RwSignal::new(form.city),
            emergency_contact_name: RwSignal::new(form.emergency_contact_name),
            emergency_contact_phone: RwSignal::new(form.emergency_contact_phone),
            emergency_contact_relation: RwSignal::new(form.emergency_contact_relation),
            blood_group: RwSignal::new(form.blood_group),
            height: RwSignal::new(form.height),
            weight: RwSignal::new(form.weight),
            marital_status: RwSignal::new(form.marital_status),
            occupation: RwSignal::new(form.occupation),
            registration_location: RwSignal::new(form.registration_location),
            notes: RwSignal::new(form.notes),
        }
    }

    fn load(&self, form: PatientForm) {
        self.first_name.set(form.first_name);
        self.last_name.set(form.last_name);
        self.date_of_birth.set(form.date_of_birth);
        self.gender.set(form.gender);
        self.phone.set(form.phone);
        self.email.set(form.email);
        self.address.set(form.address);
        self.city.set(form.city);
        self.emergency_contact_name.set(form.emergency_contact_name);
        self.emergency_contact_phone.set(form.emergency_contact_phone);
        self.emergency_contact_relation.set(form.emergency_contact_relation);
        self.blood_group.set(form.blood_group);
        self.height.set(form.height);
        self.weight.set(form.weight);
        self.marital_status.set(form.marital_status);
        self.occupation.set(form.occupation);
        self.registration_location.set(form.registration_location);
        self.notes.set(form.notes);
    }

    fn snapshot(&self) -> PatientForm {
        PatientForm {
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            date_of_birth: self.date_of_birth.get_untracked(),
            gender: self.gender.get_untracked(),
            phone: self.phone.get_untracked(),
            email: self.email.get_untracked(),
            address: self.address.get_untracked(),
            city: self.city.get_untracked(),
            emergency_contact_name: self.emergency_contact_name.get_untracked(),
            emergency_contact_phone: self.emergency_contact_phone.get_untracked(),
            emergency_contact_relation: self.emergency_contact_relation.get_untracked(),
            blood_group: self.blood_group.get_untracked(),
            height: self.height.get_untracked(),
            weight: self.weight.get_untracked(),
            marital_status: self.marital_status.get_untracked(),
            occupation: self.occupation.get_untracked(),
            registration_location: self.registration_location.get_untracked(),
            notes: self.notes.get_untracked(),
        }
    }
}

#[component]
pub fn PatientFormPage() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_notifications();
    let navigate = use_navigate();
    let id = route_id();

    let fields = PatientFields::new(blank_form());
    let errors = RwSignal::new(ValidationErrors::new());
    let saving = RwSignal::new(false);
    let loading = RwSignal::new(false);
    let saved = RwSignal::new(None::<i64>);

    // Prefill when editing
    Effect::new({
        let client = ctx.client();
        move |_| {
            let Some(id) = id.get() else {
                return;
            };
            loading.set(true);
            let client = client.clone();
            spawn_local(async move {
                match client.get_patient(id).await {
                    Ok(patient) => fields.load(form_from_patient(&patient)),
                    Err(e) => toasts.api_error(&e, "Patient introuvable"),
                }
                loading.set(false);
            });
        }
    });

    Effect::new(move |_| {
        if let Some(patient_id) = saved.get() {
            navigate(&format!("/patients/{patient_id}"), NavigateOptions::default());
        }
    });

    let on_submit = {
        let client = ctx.client();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();

            let today = chrono::Utc::now().date_naive();
            let input = match fields.snapshot().validate(today) {
                Ok(input) => input,
                Err(field_errors) => {
                    errors.set(field_errors);
                    return;
                }
            };
            errors.set(ValidationErrors::new());
            saving.set(true);

            let client = client.clone();
            let editing = id.get_untracked();
            spawn_local(async move {
                let result = match editing {
                    Some(id) => client.update_patient(id, &input).await,
                    None => client.create_patient(&input).await,
                };
                match result {
                    Ok(patient) => {
                        toasts.success(if editing.is_some() {
                            "Patient mis à jour"
                        } else {
                            "Patient enregistré"
                        });
                        saved.set(Some(patient.id));
                    }
                    Err(e) => toasts.api_error(&e, "Enregistrement impossible"),
                }
                saving.set(false);
            });
        }
    };

    let title = move || {
        if id.get().is_some() {
            "Modifier le patient"
        } else {
            "Nouveau patient"
        }
    };
    let back_href = move || match id.get() {
        Some(id) => format!("/patients/{id}"),
        None => "/patients".to_string(),
    };

    view! {
        <div class="space-y-6 max-w-4xl">
            <A href=back_href attr:class="inline-flex items-center gap-1 text-sm text-gray-500 hover:text-gray-800">
                <Icon name=icons::CHEVRON_LEFT class="w-4 h-4"/>
                <span>"Retour"</span>
            </A>
            <h1 class="text-2xl font-bold text-gray-900">{title}</h1>

            <Show when=move || !loading.get() fallback=|| view! { <Spinner label="Chargement..."/> }>
                <form class="card space-y-8" on:submit=on_submit.clone() novalidate=true>
                    <section class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <h2 class="md:col-span-2 text-lg font-semibold">"Identité"</h2>
                        <FormField label="Prénom" name="first_name" required=true value=fields.first_name
                            error=field_error(errors, "first_name")/>
                        <FormField label="Nom" name="last_name" required=true value=fields.last_name
                            error=field_error(errors, "last_name")/>
                        <FormField label="Date de naissance" name="date_of_birth" required=true input_type="date"
                            value=fields.date_of_birth error=field_error(errors, "date_of_birth")/>
                        <SelectField label="Sexe" name="gender" required=true value=fields.gender
                            options=GENDER_OPTIONS.to_vec() error=field_error(errors, "gender")/>
                        <SelectField label="Statut marital" name="marital_status" value=fields.marital_status
                            options=MARITAL_STATUS_OPTIONS.to_vec()/>
                        <FormField label="Profession" name="occupation" value=fields.occupation/>
                    </section>

                    <section class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <h2 class="md:col-span-2 text-lg font-semibold">"Coordonnées"</h2>
                        <FormField label="Téléphone" name="phone" required=true input_type="tel"
                            placeholder="+225XXXXXXXXXX" value=fields.phone error=field_error(errors, "phone")/>
                        <FormField label="Email" name="email" input_type="email" value=fields.email
                            error=field_error(errors, "email")/>
                        <FormField label="Adresse" name="address" value=fields.address/>
                        <FormField label="Ville" name="city" value=fields.city/>
                        <FormField label="Contact d'urgence (Nom)" name="emergency_contact_name"
                            value=fields.emergency_contact_name/>
                        <FormField label="Contact d'urgence (Tel)" name="emergency_contact_phone" input_type="tel"
                            value=fields.emergency_contact_phone error=field_error(errors, "emergency_contact_phone")/>
                        <FormField label="Relation" name="emergency_contact_relation"
                            value=fields.emergency_contact_relation/>
                        <SelectField label="Lieu d'enregistrement" name="registration_location"
                            value=fields.registration_location options=LOCATION_OPTIONS.to_vec()/>
                    </section>

                    <section class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <h2 class="md:col-span-3 text-lg font-semibold">"Informations médicales"</h2>
                        <SelectField label="Groupe sanguin" name="blood_group" value=fields.blood_group
                            options=BLOOD_GROUP_OPTIONS.to_vec()/>
                        <FormField label="Taille (cm)" name="height" value=fields.height
                            error=field_error(errors, "height")/>
                        <FormField label="Poids (kg)" name="weight" value=fields.weight
                            error=field_error(errors, "weight")/>
                    </section>

                    <TextAreaField label="Notes" name="notes" value=fields.notes rows=4/>

                    <div class="flex justify-end gap-2 pt-4 border-t">
                        <A href=back_href attr:class="btn btn-secondary">"Annuler"</A>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || {
                                if saving.get() {
                                    view! { <Spinner size=SpinnerSize::Small label="Enregistrement..."/> }.into_any()
                                } else {
                                    view! { <span>"Enregistrer"</span> }.into_any()
                                }
                            }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Gender;
    use chrono::NaiveDate;

    fn patient_json() -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "patient_id": "PAT-2025-0007",
            "first_name": "Awa",
            "last_name": "Koné",
            "full_name": "Awa Koné",
            "date_of_birth": "1994-02-11",
            "age": 31,
            "gender": "F",
            "phone": "+2250700000000",
            "address": "Quartier France",
            "city": "Grand-Bassam",
            "emergency_contact_name": "Issa Koné",
            "emergency_contact_phone": "+2250500000000",
            "emergency_contact_relation": "Frère",
            "blood_group": "O+",
            "height": "162.50",
            "weight": 58,
            "marital_status": "MARRIED",
            "registration_location": "Grand-Bassam",
            "is_active": true
        })
    }

    #[test]
    fn test_prefilled_form_validates_unchanged() {
        let patient: Patient = serde_json::from_value(patient_json()).unwrap();
        let form = form_from_patient(&patient);
        assert_eq!(form.date_of_birth, "1994-02-11");
        assert_eq!(form.height, "162.5");

        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let input = form.validate(today).unwrap();
        assert_eq!(input.gender, Some(Gender::Female));
        assert_eq!(input.weight, Some(58.0));
        assert_eq!(input.email, None);
    }

    #[test]
    fn test_blank_form_requires_identity() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let errors = blank_form().validate(today).unwrap_err();
        for field in ["first_name", "last_name", "date_of_birth", "gender", "phone"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }
}
