use contracts::domain::a001_product::Product;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use thaw::Card;

use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::money_mask::MoneyMask;

/// Route of the edit form for a product
pub fn edit_route(product: &Product) -> String {
    format!("/products/{}/edit", product.id.as_string())
}

/// One product in the grid. `delay_ms` staggers the appear animation.
#[component]
pub fn ProductCard(
    product: Product,
    #[prop(into)] static_base: String,
    mask: MoneyMask,
    #[prop(optional)] delay_ms: u32,
) -> impl IntoView {
    let navigate = use_navigate();
    let image_url = product.image_url(&static_base);
    let created = format_date(&product.created_at);
    let price = mask.format_amount(product.price);
    let edit_href = edit_route(&product);
    let (status_class, status_label) = if product.active {
        ("badge badge--success", "Ativo")
    } else {
        ("badge badge--neutral", "Inativo")
    };

    view! {
        <Card attr:class="product-card" attr:style=format!("animation: card-appear 0.28s ease-out {}ms both;", delay_ms)>
            <img class="product-card__image" src=image_url alt=product.name.clone() />
            <h3 class="product-card__title">{product.name.clone()}</h3>
            <p class="product-card__description">{product.description.clone()}</p>
            <p class="product-card__meta">{format!("EAN: {}", product.ean)}</p>
            <p class="product-card__meta">{format!("Cadastro: {}", created)}</p>
            <div class="product-card__footer">
                <span class="product-card__price">{price}</span>
                <span class=status_class>{status_label}</span>
            </div>
            <button
                class="btn btn-primary"
                on:click=move |_| navigate(&edit_href, Default::default())
            >
                {icon("edit")}
                "Editar"
            </button>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::ProductId;

    #[test]
    fn test_edit_route() {
        let product = Product {
            id: ProductId(12),
            name: String::new(),
            description: String::new(),
            price: 0.0,
            active: false,
            path_image: String::new(),
            ean: String::new(),
            created_at: String::new(),
            sales_location: None,
        };
        assert_eq!(edit_route(&product), "/products/12/edit");
    }
}
