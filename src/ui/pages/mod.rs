//! Application pages
//!
//! Login is public; every other page renders inside the signed-in layout.

mod dashboard;
mod login;
mod not_found;
mod patient_detail;
mod patient_form;
mod patients;
mod pregnancies;
mod pregnancy_detail;
mod profile;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use patient_detail::PatientDetailPage;
pub use patient_form::PatientFormPage;
pub use patients::PatientsPage;
pub use pregnancies::PregnanciesPage;
pub use pregnancy_detail::PregnancyDetailPage;
pub use profile::ProfilePage;

/// Numeric `:id` segment of the current route, `None` when absent or malformed
pub(crate) fn route_id() -> Memo<Option<i64>> {
    let params = use_params_map();
    Memo::new(move |_| params.with(|p| p.get("id")).and_then(|id| id.parse().ok()))
}
