use crate::routes::routes::AppRoutes;
use crate::shared::config::AppConfig;
use crate::shared::toast::{ToastContainer, ToastService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // API endpoints and currency format for every page
    provide_context(AppConfig::from_env());

    // Notifications raised by pages are rendered once, outside the router
    provide_context(ToastService::new());

    view! {
        <AppRoutes />
        <ToastContainer />
    }
}
