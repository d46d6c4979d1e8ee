//! One pregnancy and its consultation history

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::{ApiError, ConsultationQuery, CpnConsultation, Pregnancy};
use crate::ui::common::{Badge, BadgeVariant, EmptyState, RiskBadge, Spinner, StatusBadge};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::{report_load_error, use_notifications};
use crate::ui::pages::route_id;
use crate::ui::session::use_session;

fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Risk factors flagged on the record, in display order
fn risk_factors(pregnancy: &Pregnancy) -> Vec<String> {
    let mut factors = Vec::new();
    if pregnancy.has_diabetes {
        factors.push("Diabète".to_string());
    }
    if pregnancy.has_hypertension {
        factors.push("Hypertension".to_string());
    }
    if pregnancy.has_anemia {
        factors.push("Anémie".to_string());
    }
    if let Some(other) = pregnancy.other_risks.as_deref().map(str::trim).filter(|o| !o.is_empty()) {
        factors.push(other.to_string());
    }
    factors
}

#[component]
pub fn PregnancyDetailPage() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_notifications();
    let id = route_id();

    let pregnancy = LocalResource::new({
        let client = ctx.client();
        move || {
            let client = client.clone();
            let id = id.get();
            async move {
                match id {
                    Some(id) => client.get_pregnancy(id).await,
                    None => Err(ApiError::Http { status: 404 }),
                }
            }
        }
    });
    let consultations = LocalResource::new({
        let client = ctx.client();
        move || {
            let client = client.clone();
            let id = id.get();
            async move {
                match id {
                    Some(id) => client.list_consultations(&ConsultationQuery::for_pregnancy(id)).await,
                    None => Ok(Vec::new()),
                }
            }
        }
    });
    report_load_error(pregnancy, toasts);

    view! {
        <div class="space-y-6">
            <A href="/cpn" attr:class="inline-flex items-center gap-1 text-sm text-gray-500 hover:text-gray-800">
                <Icon name=icons::CHEVRON_LEFT class="w-4 h-4"/>
                <span>"Retour au suivi CPN"</span>
            </A>

            <Suspense fallback=|| view! { <Spinner label="Chargement..."/> }>
                {move || pregnancy.get().map(|result| match result {
                    Ok(p) => view! { <PregnancySummary pregnancy=p/> }.into_any(),
                    Err(_) => view! { <EmptyState message="Grossesse introuvable"/> }.into_any(),
                })}
            </Suspense>

            <div class="card">
                <h2 class="text-lg font-semibold mb-4">"Consultations prénatales"</h2>
                <Suspense fallback=|| view! { <Spinner/> }>
                    {move || consultations.get().map(|result| match result {
                        Ok(list) if !list.is_empty() => view! {
                            <div class="space-y-4">
                                {list
                                    .into_iter()
                                    .map(|c| view! { <ConsultationRow consultation=c/> })
                                    .collect_view()}
                            </div>
                        }
                        .into_any(),
                        _ => view! { <EmptyState message="Aucune consultation enregistrée"/> }.into_any(),
                    })}
                </Suspense>
            </div>
        </div>
    }
}

#[component]
fn PregnancySummary(pregnancy: Pregnancy) -> impl IntoView {
    let patient_href = format!("/patients/{}", pregnancy.patient);
    let factors = risk_factors(&pregnancy);
    let gestation = pregnancy
        .gestational_age_display
        .clone()
        .or_else(|| pregnancy.gestational_age_weeks.map(|w| format!("{w} SA")))
        .unwrap_or_else(|| "-".into());
    let trimester = pregnancy
        .trimester
        .map(|t| format!("Trimestre {t}"))
        .unwrap_or_default();
    let delivery = pregnancy.actual_delivery_date.map(format_date);

    view! {
        <div class="card space-y-6">
            <div class="flex items-start justify-between gap-4">
                <div>
                    <A href=patient_href attr:class="text-2xl font-bold text-gray-900 hover:text-primary-600">
                        {pregnancy.patient_name.clone()}
                    </A>
                    <p class="text-sm text-gray-500">
                        "Grossesse n°" {pregnancy.pregnancy_number} ", parité " {pregnancy.parity}
                    </p>
                </div>
                <div class="flex items-center gap-2">
                    <StatusBadge status=pregnancy.status/>
                    <RiskBadge risk=pregnancy.risk_level/>
                </div>
            </div>

            <dl class="grid grid-cols-2 md:grid-cols-4 gap-4 text-sm">
                <div>
                    <dt class="text-gray-500">"Dernières règles"</dt>
                    <dd class="font-medium">{format_date(pregnancy.last_menstrual_period)}</dd>
                </div>
                <div>
                    <dt class="text-gray-500">"Terme prévu"</dt>
                    <dd class="font-medium">{format_date(pregnancy.expected_delivery_date)}</dd>
                </div>
                <div>
                    <dt class="text-gray-500">"Âge gestationnel"</dt>
                    <dd class="font-medium">{gestation} " " <span class="text-gray-500">{trimester}</span></dd>
                </div>
                <div>
                    <dt class="text-gray-500">"Sage-femme"</dt>
                    <dd class="font-medium">{pregnancy.assigned_midwife_name.clone().unwrap_or_else(|| "-".into())}</dd>
                </div>
                {delivery.map(|d| view! {
                    <div>
                        <dt class="text-gray-500">"Accouchement"</dt>
                        <dd class="font-medium">{d}</dd>
                    </div>
                })}
            </dl>

            <div>
                <h3 class="text-sm font-medium text-gray-500 mb-2">"Facteurs de risque"</h3>
                {if factors.is_empty() {
                    view! { <p class="text-sm">"Aucun"</p> }.into_any()
                } else {
                    view! {
                        <div class="flex flex-wrap gap-2">
                            {factors
                                .into_iter()
                                .map(|f| view! { <Badge variant=BadgeVariant::Warning>{f}</Badge> })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn ConsultationRow(consultation: CpnConsultation) -> impl IntoView {
    let c = consultation;
    let blood_pressure = c.blood_pressure();
    let next = c.next_appointment_date.map(format_date);

    view! {
        <div class="border rounded-lg p-4 space-y-2">
            <div class="flex items-center justify-between">
                <div class="flex items-center gap-2">
                    <Badge variant=BadgeVariant::Info>{c.cpn_type.label()}</Badge>
                    <span class="text-sm font-medium">{format_date(c.consultation_date)}</span>
                    <span class="text-sm text-gray-500">{c.gestational_age_weeks} " SA"</span>
                </div>
                <span class="text-sm text-gray-500">{c.conducted_by_name.clone().unwrap_or_default()}</span>
            </div>
            <div class="flex flex-wrap gap-4 text-sm">
                <span>"Poids : " {format!("{:.1}", c.weight)} " kg"</span>
                <span class:text-red-600=c.is_high_blood_pressure>"Tension : " {blood_pressure}</span>
                {c.hemoglobin.map(|hb| view! {
                    <span class:text-red-600=c.is_anemic>"Hb : " {format!("{hb:.1}")} " g/dL"</span>
                })}
                {c.fetal_heart_rate.map(|bpm| view! { <span>"BCF : " {bpm} " bpm"</span> })}
            </div>
            {c.diagnosis.clone().filter(|d| !d.trim().is_empty()).map(|d| view! {
                <p class="text-sm"><span class="text-gray-500">"Diagnostic : "</span>{d}</p>
            })}
            {c.referral_needed.then(|| view! {
                <p class="text-sm text-red-600">
                    "Référence : " {c.referral_reason.clone().unwrap_or_default()}
                </p>
            })}
            {next.map(|d| view! { <p class="text-sm text-gray-500">"Prochain rendez-vous : " {d}</p> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_factors_in_order() {
        let pregnancy: Pregnancy = serde_json::from_value(serde_json::json!({
            "id": 3,
            "patient": 7,
            "patient_name": "Awa Koné",
            "pregnancy_number": 2,
            "parity": 1,
            "last_menstrual_period": "2025-01-10",
            "expected_delivery_date": "2025-10-17",
            "status": "ONGOING",
            "risk_level": "HIGH",
            "has_hypertension": true,
            "has_anemia": true,
            "other_risks": "  "
        }))
        .unwrap();
        assert_eq!(risk_factors(&pregnancy), vec!["Hypertension", "Anémie"]);
    }
}
