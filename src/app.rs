use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::{ParamSegment, StaticSegment, WildcardSegment};

use crate::ui::pages::{
    DashboardPage, LoginPage, NotFoundPage, PatientDetailPage, PatientFormPage, PatientsPage,
    PregnanciesPage, PregnancyDetailPage, ProfilePage,
};
use crate::ui::{
    AppLayout, NotificationsContainer, provide_nav_context, provide_notifications,
    provide_session_context,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="fr">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    provide_notifications();
    provide_session_context();
    provide_nav_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/adjahi-admin.css"/>
        <Title text="ONG ADJAHI - Plateforme de Gestion de Santé"/>

        <NotificationsContainer/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <ParentRoute path=StaticSegment("") view=AppLayout>
                    <Route path=StaticSegment("") view=DashboardPage/>
                    <Route path=StaticSegment("patients") view=PatientsPage/>
                    <Route path=(StaticSegment("patients"), StaticSegment("new")) view=PatientFormPage/>
                    <Route path=(StaticSegment("patients"), ParamSegment("id")) view=PatientDetailPage/>
                    <Route
                        path=(StaticSegment("patients"), ParamSegment("id"), StaticSegment("edit"))
                        view=PatientFormPage
                    />
                    <Route path=StaticSegment("cpn") view=PregnanciesPage/>
                    <Route path=(StaticSegment("cpn"), ParamSegment("id")) view=PregnancyDetailPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                    // Unknown paths stay behind the guard
                    <Route path=WildcardSegment("any") view=NotFoundPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
