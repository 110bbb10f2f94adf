pub mod card;
pub mod filter_form;
pub mod state;

use self::card::ProductCard;
use self::filter_form::ProductFilterForm;
use self::state::{create_state, Completion, ListRequest, FETCH_FAILED_MESSAGE};
use crate::domain::a001_product::api::ProductApi;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

#[component]
pub fn ProductListPage() -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");
    let toast = use_toast();

    let state = create_state();
    let show_filters = RwSignal::new(false);
    let api = ProductApi::new(config.clone());
    let mask = config.money_mask();
    let static_base = config.static_base.clone();

    // Issue a request and apply whatever comes back
    let load = Callback::new(move |request: ListRequest| {
        let api = api.clone();
        spawn_local(async move {
            let result = api.list_products(&request.query).await;
            let completion = state.try_update(|s| s.complete(request.seq, request.filter, result));
            match completion {
                Some(Completion::Loaded) => {
                    log::debug!("product list #{} loaded", request.seq);
                }
                Some(Completion::Failed(e)) => {
                    log::error!("Failed to load products: {}", e);
                    toast.error(FETCH_FAILED_MESSAGE);
                }
                Some(Completion::Stale) | None => {}
            }
        });
    });

    Effect::new(move |_| {
        if let Some(request) = state.try_update(|s| s.mount()).flatten() {
            load.run(request);
        }
    });

    let apply_filters = Callback::new(move |_: ()| {
        if let Some(request) = state.try_update(|s| s.submit_filters()) {
            load.run(request);
        }
    });

    let go_to_page = Callback::new(move |page: u32| {
        if let Some(request) = state.try_update(|s| s.request_page(page)).flatten() {
            load.run(request);
        }
    });

    let active_filters_count =
        Signal::derive(move || state.with(|s| s.applied().active_count()));

    view! {
        <div class="page product-list">
            <div class="page__header">
                <h1 class="page__title">"Consulte os seus Produtos cadastrados"</h1>
            </div>

            <div class="page__toolbar">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| show_filters.update(|v| *v = !*v)
                >
                    {icon("filter")}
                    {move || if show_filters.get() { "Fechar Filtro" } else { "Filtrar" }}
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! { <span class="badge badge--primary">{count}</span> })
                    }}
                </Button>
                <A href="/products/create" attr:class="btn btn-primary">
                    {icon("plus")}
                    "Adicionar Produto"
                </A>
            </div>

            <Show when=move || show_filters.get()>
                <ProductFilterForm state=state on_apply=apply_filters />
            </Show>

            {move || {
                if state.with(|s| s.is_loading()) {
                    view! {
                        <Flex justify=FlexJustify::Center class="page__loading">
                            <Spinner />
                        </Flex>
                    }
                    .into_any()
                } else {
                    let static_base = static_base.clone();
                    view! {
                        <div class="product-grid">
                            <For
                                each=move || {
                                    state.with(|s| s.items().iter().cloned().enumerate().collect::<Vec<_>>())
                                }
                                key=|(_, product)| product.id
                                children=move |(index, product)| {
                                    view! {
                                        <ProductCard
                                            product=product
                                            static_base=static_base.clone()
                                            mask=mask
                                            delay_ms=(index as u32).min(10) * 40
                                        />
                                    }
                                }
                            />
                        </div>
                    }
                    .into_any()
                }
            }}

            <PaginationControls
                current_page=Signal::derive(move || state.with(|s| s.page()))
                total_pages=Signal::derive(move || state.with(|s| s.pagination().total_pages))
                total_items=Signal::derive(move || state.with(|s| s.pagination().total_items))
                on_page_change=go_to_page
            />
        </div>
    }
}
