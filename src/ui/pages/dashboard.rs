//! Dashboard with the headline figures of both sites

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::{PregnancyQuery, PregnancyStatus, RiskLevel};
use crate::ui::common::{EmptyState, RiskBadge, Spinner};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::{report_load_error, use_notifications};
use crate::ui::session::use_session;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_session();
    let toasts = use_notifications();

    let patient_stats = LocalResource::new({
        let client = ctx.client();
        move || {
            let client = client.clone();
            async move { client.patient_stats().await }
        }
    });
    let pregnancy_stats = LocalResource::new({
        let client = ctx.client();
        move || {
            let client = client.clone();
            async move { client.pregnancy_stats().await }
        }
    });
    let high_risk = LocalResource::new({
        let client = ctx.client();
        move || {
            let client = client.clone();
            let query = PregnancyQuery {
                status: Some(PregnancyStatus::Ongoing),
                risk_level: Some(RiskLevel::High),
                ..Default::default()
            };
            async move { client.list_pregnancies(&query).await }
        }
    });
    report_load_error(patient_stats, toasts);
    report_load_error(pregnancy_stats, toasts);
    report_load_error(high_risk, toasts);

    let total_patients = move || patient_stats.get().and_then(Result::ok).map(|s| s.total);
    let pregnancies = move || pregnancy_stats.get().and_then(Result::ok);

    view! {
        <div class="space-y-6">
            <h1 class="text-2xl font-bold text-gray-900">"Tableau de bord"</h1>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
                <StatCard title="Total Patients" icon=icons::USERS value=Signal::derive(total_patients)/>
                <StatCard
                    title="Grossesses en cours"
                    icon=icons::HEART
                    value=Signal::derive(move || pregnancies().map(|s| s.ongoing))
                />
                <StatCard
                    title="Cas à risque"
                    icon=icons::WARNING
                    value=Signal::derive(move || pregnancies().map(|s| s.high_risk))
                />
                <StatCard
                    title="Accouchements ce mois"
                    icon=icons::CALENDAR
                    value=Signal::derive(move || pregnancies().map(|s| s.due_this_month))
                />
            </div>

            <div class="card">
                <h2 class="text-lg font-semibold mb-4">"Grossesses à haut risque"</h2>
                <Suspense fallback=|| view! { <Spinner/> }>
                    {move || high_risk.get().map(|result| match result {
                        Ok(list) if list.is_empty() => {
                            view! { <EmptyState message="Aucune grossesse à haut risque"/> }.into_any()
                        }
                        Ok(list) => view! {
                            <ul class="divide-y">
                                {list
                                    .into_iter()
                                    .map(|p| {
                                        let href = format!("/cpn/{}", p.id);
                                        view! {
                                            <li class="py-3 flex items-center justify-between">
                                                <A href=href attr:class="font-medium hover:text-primary-600">
                                                    {p.patient_name}
                                                </A>
                                                <div class="flex items-center gap-3 text-sm text-gray-500">
                                                    <span>"Terme : " {p.expected_delivery_date.format("%d/%m/%Y").to_string()}</span>
                                                    <RiskBadge risk=p.risk_level/>
                                                </div>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                        .into_any(),
                        Err(_) => view! { <EmptyState message="Données indisponibles"/> }.into_any(),
                    })}
                </Suspense>
            </div>
        </div>
    }
}

/// Figure card; shows a dash until the value is known
#[component]
fn StatCard(title: &'static str, icon: &'static str, value: Signal<Option<u64>>) -> impl IntoView {
    view! {
        <div class="card flex items-center justify-between">
            <div>
                <p class="text-sm text-gray-500">{title}</p>
                <p class="text-3xl font-bold text-gray-900 mt-1">
                    {move || value.get().map(|v| v.to_string()).unwrap_or_else(|| "-".into())}
                </p>
            </div>
            <div class="w-12 h-12 rounded-full bg-primary-50 text-primary-600 flex items-center justify-center">
                <Icon name=icon class="w-6 h-6"/>
            </div>
        </div>
    }
}
