//! Prenatal follow-up: pregnancies with status and risk filters

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::{Pregnancy, PregnancyQuery, PregnancyStatus, RiskLevel};
use crate::ui::common::{EmptyState, RiskBadge, Spinner, StatusBadge};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::{report_load_error, use_notifications};
use crate::ui::session::use_session;

const STATUSES: [PregnancyStatus; 4] = [
    PregnancyStatus::Ongoing,
    PregnancyStatus::Completed,
    PregnancyStatus::Miscarriage,
    PregnancyStatus::Abortion,
];

const RISKS: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

fn status_filter(value: &str) -> Option<PregnancyStatus> {
    STATUSES.into_iter().find(|s| s.as_query() == value)
}

fn risk_filter(value: &str) -> Option<RiskLevel> {
    RISKS.into_iter().find(|r| r.as_query() == value)
}

#[component]
pub fn PregnanciesPage() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_notifications();

    let search = RwSignal::new(String::new());
    let status = RwSignal::new(PregnancyStatus::Ongoing.as_query().to_string());
    let risk = RwSignal::new(String::new());

    let query = Memo::new(move |_| PregnancyQuery {
        search: Some(search.get()),
        status: status.with(|s| status_filter(s)),
        risk_level: risk.with(|r| risk_filter(r)),
        patient: None,
    });

    let pregnancies = LocalResource::new({
        let client = ctx.client();
        move || {
            let client = client.clone();
            let query = query.get();
            async move { client.list_pregnancies(&query).await }
        }
    });
    report_load_error(pregnancies, toasts);

    let stats = LocalResource::new({
        let client = ctx.client();
        move || {
            let client = client.clone();
            async move { client.consultation_stats().await }
        }
    });

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-gray-900">"Suivi CPN"</h1>

            {move || stats.get().and_then(Result::ok).map(|s| view! {
                <div class="grid grid-cols-2 md:grid-cols-4 gap-4 text-sm">
                    <div class="card">
                        <p class="text-gray-500">"Consultations"</p>
                        <p class="text-2xl font-bold">{s.total}</p>
                    </div>
                    <div class="card">
                        <p class="text-gray-500">"Tension élevée"</p>
                        <p class="text-2xl font-bold">{s.high_blood_pressure}</p>
                    </div>
                    <div class="card">
                        <p class="text-gray-500">"Anémie"</p>
                        <p class="text-2xl font-bold">{s.anemic}</p>
                    </div>
                    <div class="card">
                        <p class="text-gray-500">"Références"</p>
                        <p class="text-2xl font-bold">{s.referrals_needed}</p>
                    </div>
                </div>
            })}

            <div class="card flex flex-col md:flex-row gap-3">
                <div class="relative flex-1">
                    <span class="absolute left-3 top-1/2 -translate-y-1/2 text-gray-400">
                        <Icon name=icons::SEARCH class="w-4 h-4"/>
                    </span>
                    <input
                        type="search"
                        class="input pl-9"
                        placeholder="Rechercher une patiente"
                        prop:value=move || search.get()
                        on:change=move |ev| search.set(event_target_value(&ev))
                    />
                </div>
                <select
                    class="input md:w-48"
                    prop:value=move || status.get()
                    on:change=move |ev| status.set(event_target_value(&ev))
                >
                    <option value="">"Tous les statuts"</option>
                    {STATUSES.iter().map(|s| view! { <option value=s.as_query()>{s.label()}</option> }).collect_view()}
                </select>
                <select
                    class="input md:w-48"
                    prop:value=move || risk.get()
                    on:change=move |ev| risk.set(event_target_value(&ev))
                >
                    <option value="">"Tous les risques"</option>
                    {RISKS.iter().map(|r| view! { <option value=r.as_query()>{r.label()}</option> }).collect_view()}
                </select>
            </div>

            <div class="card overflow-x-auto">
                <Suspense fallback=|| view! { <Spinner label="Chargement..."/> }>
                    {move || pregnancies.get().map(|result| match result {
                        Ok(list) if list.is_empty() => {
                            view! { <EmptyState message="Aucune grossesse trouvée"/> }.into_any()
                        }
                        Ok(list) => view! { <PregnancyTable pregnancies=list/> }.into_any(),
                        Err(_) => view! { <EmptyState message="Impossible de charger le suivi"/> }.into_any(),
                    })}
                </Suspense>
            </div>
        </div>
    }
}

#[component]
fn PregnancyTable(pregnancies: Vec<Pregnancy>) -> impl IntoView {
    view! {
        <table class="w-full text-sm">
            <thead>
                <tr class="text-left text-gray-500 border-b">
                    <th class="py-2 pr-4">"Patiente"</th>
                    <th class="py-2 pr-4">"Âge gestationnel"</th>
                    <th class="py-2 pr-4">"Terme prévu"</th>
                    <th class="py-2 pr-4">"Sage-femme"</th>
                    <th class="py-2 pr-4">"Statut"</th>
                    <th class="py-2">"Risque"</th>
                </tr>
            </thead>
            <tbody class="divide-y">
                {pregnancies
                    .into_iter()
                    .map(|p| {
                        let href = format!("/cpn/{}", p.id);
                        let gestation = p
                            .gestational_age_display
                            .clone()
                            .or_else(|| p.gestational_age_weeks.map(|w| format!("{w} SA")))
                            .unwrap_or_else(|| "-".into());
                        view! {
                            <tr class="hover:bg-gray-50">
                                <td class="py-3 pr-4">
                                    <A href=href attr:class="font-medium hover:text-primary-600">{p.patient_name}</A>
                                </td>
                                <td class="py-3 pr-4">{gestation}</td>
                                <td class="py-3 pr-4">{p.expected_delivery_date.format("%d/%m/%Y").to_string()}</td>
                                <td class="py-3 pr-4">{p.assigned_midwife_name.unwrap_or_else(|| "-".into())}</td>
                                <td class="py-3 pr-4"><StatusBadge status=p.status/></td>
                                <td class="py-3"><RiskBadge risk=p.risk_level/></td>
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
    fn test_filters_parse_select_values() {
        assert_eq!(status_filter("ONGOING"), Some(PregnancyStatus::Ongoing));
        assert_eq!(status_filter(""), None);
        assert_eq!(risk_filter("HIGH"), Some(RiskLevel::High));
        assert_eq!(risk_filter("unknown"), None);
    }
}
