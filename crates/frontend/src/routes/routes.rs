use crate::domain::a001_product::ui::details::{ProductCreatePage, ProductEditPage};
use crate::domain::a001_product::ui::list::ProductListPage;
use crate::layout::Shell;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--not-found">
            <h1 class="page__title">"Página não encontrada"</h1>
            <A href="/">"Voltar para a lista de produtos"</A>
        </div>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=ProductListPage />
                    <Route path=path!("/products/create") view=ProductCreatePage />
                    <Route path=path!("/products/:id/edit") view=ProductEditPage />
                </Routes>
            </Shell>
        </Router>
    }
}
