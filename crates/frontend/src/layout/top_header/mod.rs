//! TopHeader component - application top navigation bar.

use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn TopHeader() -> impl IntoView {
    view! {
        <header class="top-header">
            <A href="/" attr:class="top-header__brand">
                {icon("products")}
                <span class="top-header__title">"Catálogo de Produtos"</span>
            </A>

            <nav class="top-header__actions">
                <A href="/" attr:class="top-header__link">"Produtos"</A>
                <A href="/products/create" attr:class="top-header__link">
                    {icon("plus")}
                    "Novo Produto"
                </A>
            </nav>
        </header>
    }
}
