use contracts::domain::a001_product::{ActiveStatusFilter, SalesLocationFilter};
use leptos::prelude::*;

use super::state::ProductListState;

/// Filter form of the product list. Edits the draft filters; nothing is
/// fetched until the form is submitted.
#[component]
pub fn ProductFilterForm(
    state: RwSignal<ProductListState>,
    /// Called on submit
    on_apply: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-panel">
            <h3 class="filter-panel__title">"Filtros"</h3>
            <form
                class="filter-panel-content"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    on_apply.run(());
                }
            >
                <div class="form-group">
                    <label for="filter-name">"Nome do Produto"</label>
                    <input
                        type="text"
                        id="filter-name"
                        placeholder="Pesquisar por nome"
                        prop:value=move || state.with(|s| s.draft().name.clone())
                        on:input=move |ev| {
                            state.update(|s| s.set_name(event_target_value(&ev)));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="filter-status">"Status"</label>
                    <select
                        id="filter-status"
                        prop:value=move || state.with(|s| s.draft().status.as_str())
                        on:change=move |ev| {
                            let status = ActiveStatusFilter::parse(&event_target_value(&ev));
                            state.update(|s| s.set_status_filter(status));
                        }
                    >
                        {ActiveStatusFilter::OPTIONS
                            .iter()
                            .map(|option| {
                                view! { <option value=option.as_str()>{option.label()}</option> }
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group form-group--inline">
                    <label>"Local de Venda:"</label>
                    {SalesLocationFilter::OPTIONS
                        .iter()
                        .map(|option| {
                            let option = *option;
                            let id = format!("filter-location-{}", option.as_str());
                            view! {
                                <span class="radio-option">
                                    <input
                                        type="radio"
                                        id=id.clone()
                                        name="filter_sales_location"
                                        value=option.as_str()
                                        prop:checked=move || state.with(|s| s.draft().location == option)
                                        on:change=move |_| {
                                            state.update(|s| s.set_location_filter(option));
                                        }
                                    />
                                    <label for=id>{option.label()}</label>
                                </span>
                            }
                        })
                        .collect_view()}
                </div>

                <button type="submit" class="btn btn-primary">
                    "Aplicar Filtros"
                </button>
            </form>
        </div>
    }
}
