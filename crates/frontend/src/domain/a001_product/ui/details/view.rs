use super::model::{FormField, FormMode, EAN_LENGTH};
use super::view_model::ProductDetailsViewModel;
use crate::domain::a001_product::api::ProductApi;
use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;
use contracts::domain::a001_product::{ProductId, SalesLocation};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};
use std::rc::Rc;
use thaw::*;

fn field_error(vm: &ProductDetailsViewModel, field: FormField) -> impl IntoView {
    let vm = vm.clone();
    move || {
        vm.field_error(field)
            .map(|message| view! { <span class="field-error">{message}</span> })
    }
}

#[component]
pub fn ProductDetails(
    mode: FormMode,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");
    let vm = ProductDetailsViewModel::new(
        mode,
        ProductApi::new(config.clone()),
        config.money_mask(),
        use_toast(),
    );
    vm.load_if_needed();

    let vm_clone = vm.clone();

    view! {
        <div class="page details-container product-details">
            <div class="page__header">
                <h1 class="page__title">
                    {if vm.is_edit_mode() { "Editar Produto" } else { "Cadastrar Produto" }}
                </h1>
            </div>

            {
                let vm = vm_clone.clone();
                move || {
                    vm.loading.get().then(|| view! {
                        <Flex justify=FlexJustify::Center class="page__loading">
                            <Spinner />
                            <span class="page__loading-text">"Carregando..."</span>
                        </Flex>
                    })
                }
            }

            <form
                class="details-form"
                class:hidden={
                    let vm = vm_clone.clone();
                    move || vm.loading.get()
                }
                on:submit={
                    let vm = vm_clone.clone();
                    let on_saved = on_saved.clone();
                    move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        vm.submit(on_saved.clone());
                    }
                }
            >
                <div class="form-group">
                    <label for="product-name">"Nome do Produto"</label>
                    <input
                        type="text"
                        id="product-name"
                        placeholder="Informe o nome do produto"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.with(|f| f.name.clone())
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.set_name(event_target_value(&ev))
                        }
                    />
                    {field_error(&vm_clone, FormField::Name)}
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="product-ean">"EAN"</label>
                        <input
                            type="text"
                            id="product-ean"
                            inputmode="numeric"
                            maxlength=EAN_LENGTH.to_string()
                            placeholder="0000000000000"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.with(|f| f.ean.clone())
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| vm.set_ean(event_target_value(&ev))
                            }
                        />
                        {
                            let vm = vm_clone.clone();
                            move || {
                                vm.ean_check
                                    .with(|c| c.is_checking())
                                    .then(|| view! { <span class="field-hint">"Verificando EAN..."</span> })
                            }
                        }
                        {field_error(&vm_clone, FormField::Ean)}
                    </div>

                    <div class="form-group">
                        <label for="product-price">"Valor"</label>
                        <input
                            type="text"
                            id="product-price"
                            inputmode="numeric"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.with(|f| f.price.clone())
                            }
                            on:input={
                                let vm = vm_clone.clone();
                                move |ev| vm.set_price(event_target_value(&ev))
                            }
                        />
                        {field_error(&vm_clone, FormField::Price)}
                    </div>
                </div>

                <div class="form-group">
                    <label for="product-description">"Descrição"</label>
                    <textarea
                        id="product-description"
                        rows="4"
                        placeholder="Descreva o produto"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.with(|f| f.description.clone())
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.set_description(event_target_value(&ev))
                        }
                    />
                    {field_error(&vm_clone, FormField::Description)}
                </div>

                <div class="form-group">
                    <label for="product-image">"Imagem"</label>
                    <input
                        type="file"
                        id="product-image"
                        accept="image/*"
                        on:change={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let input: web_sys::HtmlInputElement = event_target(&ev);
                                let file = input.files().and_then(|files| files.get(0));
                                vm.set_image(file);
                            }
                        }
                    />
                    {
                        let vm = vm_clone.clone();
                        move || {
                            vm.image_name
                                .get()
                                .map(|name| view! { <span class="field-hint">{name}</span> })
                        }
                    }
                    {field_error(&vm_clone, FormField::Image)}
                </div>

                <div class="form-group form-group--inline">
                    <label>"Local de Venda:"</label>
                    {SalesLocation::ALL
                        .iter()
                        .map(|location| {
                            let location = *location;
                            let id = format!("product-location-{}", location.as_str());
                            let vm_checked = vm_clone.clone();
                            let vm_change = vm_clone.clone();
                            view! {
                                <span class="radio-option">
                                    <input
                                        type="radio"
                                        id=id.clone()
                                        name="sales_location"
                                        value=location.as_str()
                                        prop:checked=move || {
                                            vm_checked.form.with(|f| f.sales_location == Some(location))
                                        }
                                        on:change=move |_| vm_change.set_sales_location(location)
                                    />
                                    <label for=id>{location.label()}</label>
                                </span>
                            }
                        })
                        .collect_view()}
                    {field_error(&vm_clone, FormField::SalesLocation)}
                </div>

                {vm_clone.is_edit_mode().then(|| {
                    [(true, "Ativo"), (false, "Inativo")]
                        .into_iter()
                        .map(|(active, label)| {
                            let id = format!("product-active-{}", active);
                            let vm_checked = vm_clone.clone();
                            let vm_change = vm_clone.clone();
                            view! {
                                <span class="radio-option">
                                    <input
                                        type="radio"
                                        id=id.clone()
                                        name="active"
                                        prop:checked=move || vm_checked.form.with(|f| f.active == active)
                                        on:change=move |_| vm_change.set_active(active)
                                    />
                                    <label for=id>{label}</label>
                                </span>
                            }
                        })
                        .collect_view()
                })
                .map(|options| view! {
                    <div class="form-group form-group--inline">
                        <label>"Situação:"</label>
                        {options}
                    </div>
                })}

                <div class="details-actions">
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled={
                            let vm = vm_clone.clone();
                            move || !vm.can_submit()
                        }
                    >
                        {icon("save")}
                        {
                            let vm = vm_clone.clone();
                            move || {
                                if vm.submitting.get() {
                                    "Salvando..."
                                } else if vm.is_edit_mode() {
                                    "Salvar Alterações"
                                } else {
                                    "Cadastrar Produto"
                                }
                            }
                        }
                    </button>
                    <button
                        type="button"
                        class="btn btn-secondary"
                        on:click=move |_| (on_cancel)(())
                    >
                        {icon("cancel")}
                        "Cancelar"
                    </button>
                </div>
            </form>
        </div>
    }
}

fn go_home() -> Rc<dyn Fn(())> {
    let navigate = use_navigate();
    Rc::new(move |_| navigate("/", Default::default()))
}

#[component]
pub fn ProductCreatePage() -> impl IntoView {
    let on_done = go_home();
    view! { <ProductDetails mode=FormMode::Create on_saved=on_done.clone() on_cancel=on_done /> }
}

#[component]
pub fn ProductEditPage() -> impl IntoView {
    let params = use_params_map();
    let id = params
        .read_untracked()
        .get("id")
        .and_then(|raw| ProductId::from_string(&raw).ok());
    let on_done = go_home();

    match id {
        Some(id) => view! {
            <ProductDetails mode=FormMode::Edit(id) on_saved=on_done.clone() on_cancel=on_done />
        }
        .into_any(),
        None => {
            log::warn!("edit route without a valid product id");
            view! {
                <div class="page">
                    <p>"Produto não encontrado."</p>
                    <A href="/">"Voltar para a lista"</A>
                </div>
            }
            .into_any()
        }
    }
}
