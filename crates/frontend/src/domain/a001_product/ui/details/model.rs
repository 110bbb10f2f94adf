//! Form values, validation rules and DTO building for the product form

use std::collections::BTreeMap;

use contracts::domain::a001_product::{
    CreateProductDto, Product, ProductId, SalesLocation, UpdateProductDto,
};

use crate::shared::api_error::ApiError;
use crate::shared::money_mask::MoneyMask;

pub const EAN_LENGTH: usize = 13;
pub const MIN_PRICE: f64 = 1.0;
pub const EAN_TAKEN_MESSAGE: &str = "Este EAN já está cadastrado.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ProductId),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }

    pub fn saved_message(&self) -> &'static str {
        match self {
            FormMode::Create => "Produto cadastrado com sucesso!",
            FormMode::Edit(_) => "Produto atualizado com sucesso!",
        }
    }

    pub fn failed_message(&self) -> &'static str {
        match self {
            FormMode::Create => "Erro ao cadastrar o produto. Tente novamente.",
            FormMode::Edit(_) => "Erro ao atualizar o produto. Tente novamente.",
        }
    }
}

pub const LOAD_FAILED_MESSAGE: &str = "Erro ao carregar os dados do produto.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Ean,
    Price,
    Description,
    Image,
    SalesLocation,
}

/// Inline validation messages, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop the message of a field the user just edited
    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    fn set(&mut self, field: FormField, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }
}

/// Outcome of the eager EAN uniqueness check
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EanCheck {
    #[default]
    Unchecked,
    /// Waiting for the API about this value
    Checking(String),
    Available,
    Taken,
}

impl EanCheck {
    pub fn blocks_submit(&self) -> bool {
        matches!(self, EanCheck::Checking(_) | EanCheck::Taken)
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, EanCheck::Checking(_))
    }

    /// State after the API answered about `ean`. `None` when the field has
    /// moved on since the check was issued.
    ///
    /// Only a status response marks the EAN as taken; a transport failure
    /// leaves it unchecked so it does not block the form.
    pub fn resolve(&self, ean: &str, result: &Result<(), ApiError>) -> Option<EanCheck> {
        match self {
            EanCheck::Checking(pending) if pending == ean => {}
            _ => return None,
        }
        Some(match result {
            Ok(()) => EanCheck::Available,
            Err(ApiError::Status(_)) => EanCheck::Taken,
            Err(_) => EanCheck::Unchecked,
        })
    }
}

/// Values of the product form. `price` holds the masked display string.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub ean: String,
    pub price: String,
    pub description: String,
    pub sales_location: Option<SalesLocation>,
    pub active: bool,
}

impl ProductForm {
    /// Empty form for a new product
    pub fn new(mask: &MoneyMask) -> Self {
        Self {
            name: String::new(),
            ean: String::new(),
            price: mask.encode("0"),
            description: String::new(),
            sales_location: Some(SalesLocation::Event),
            active: true,
        }
    }

    /// Form pre-filled from a stored product
    pub fn from_product(product: &Product, mask: &MoneyMask) -> Self {
        Self {
            name: product.name.clone(),
            ean: product.ean.clone(),
            price: mask.encode_cents(product.price_cents()),
            description: product.description.clone(),
            sales_location: product.sales_location,
            active: product.active,
        }
    }

    /// Whether `ean` should be checked against the API right now
    pub fn wants_ean_check(&self, stored_ean: Option<&str>) -> bool {
        self.ean.chars().count() == EAN_LENGTH && stored_ean != Some(self.ean.as_str())
    }

    /// Body for `POST /products`. `None` if the form does not validate.
    pub fn to_create_dto(&self, mask: &MoneyMask, path_image: String) -> Option<CreateProductDto> {
        Some(CreateProductDto {
            name: self.name.trim().to_string(),
            ean: self.ean.clone(),
            price: mask.decode(&self.price).value()?,
            description: self.description.trim().to_string(),
            sales_location: self.sales_location?,
            path_image,
        })
    }

    /// Body for `PUT /products/{id}`. The EAN is sent only when it changed.
    pub fn to_update_dto(
        &self,
        stored: &Product,
        mask: &MoneyMask,
        path_image: String,
    ) -> Option<UpdateProductDto> {
        Some(UpdateProductDto {
            name: self.name.trim().to_string(),
            ean: UpdateProductDto::changed_ean(&stored.ean, &self.ean),
            price: mask.decode(&self.price).value()?,
            description: self.description.trim().to_string(),
            sales_location: self.sales_location?,
            path_image,
            active: self.active,
        })
    }
}

/// Check every rule. `has_image` is whether a file is selected; an image is
/// only mandatory when creating.
pub fn validate(
    form: &ProductForm,
    mask: &MoneyMask,
    mode: FormMode,
    has_image: bool,
) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if form.name.trim().is_empty() {
        errors.set(FormField::Name, "O nome do produto é obrigatório.");
    }

    if !mask.decode(&form.price).at_least(MIN_PRICE) {
        errors.set(
            FormField::Price,
            "O Valor da cobrança deve ser maior ou igual a R$ 1,00",
        );
    }

    if form.ean.is_empty() {
        errors.set(FormField::Ean, "O EAN é obrigatório.");
    } else if form.ean.chars().count() != EAN_LENGTH {
        errors.set(FormField::Ean, "EAN deve ter 13 caracteres.");
    } else if !form.ean.chars().all(|c| c.is_ascii_digit()) {
        errors.set(FormField::Ean, "EAN deve ser numérico.");
    }

    if form.description.trim().is_empty() {
        errors.set(FormField::Description, "A descrição é obrigatória.");
    }

    if mode == FormMode::Create && !has_image {
        errors.set(FormField::Image, "A imagem é obrigatória.");
    }

    if form.sales_location.is_none() {
        errors.set(
            FormField::SalesLocation,
            "A situação do produto é obrigatória.",
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask() -> MoneyMask {
        MoneyMask::default()
    }

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Camiseta".to_string(),
            ean: "7891234567895".to_string(),
            price: mask().encode("4990"),
            description: "Algodão".to_string(),
            sales_location: Some(SalesLocation::Store),
            active: true,
        }
    }

    fn stored() -> Product {
        Product {
            id: ProductId(3),
            name: "Camiseta".to_string(),
            description: "Algodão".to_string(),
            price: 49.9,
            active: true,
            path_image: "images/camiseta.png".to_string(),
            ean: "7891234567895".to_string(),
            created_at: "2024-03-15".to_string(),
            sales_location: Some(SalesLocation::Store),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let errors = validate(&valid_form(), &mask(), FormMode::Create, true);
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn test_new_form_starts_masked_at_zero() {
        let form = ProductForm::new(&mask());
        assert_eq!(form.price, "R$\u{a0}0,00");
        assert_eq!(form.sales_location, Some(SalesLocation::Event));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let mut form = ProductForm::new(&mask());
        form.sales_location = None;
        let errors = validate(&form, &mask(), FormMode::Create, false);
        for field in [
            FormField::Name,
            FormField::Ean,
            FormField::Price,
            FormField::Description,
            FormField::Image,
            FormField::SalesLocation,
        ] {
            assert!(errors.get(field).is_some(), "{:?}", field);
        }
        assert_eq!(errors.get(FormField::Ean), Some("O EAN é obrigatório."));
        assert_eq!(errors.get(FormField::Image), Some("A imagem é obrigatória."));
    }

    #[test]
    fn test_image_optional_on_edit() {
        let errors = validate(&valid_form(), &mask(), FormMode::Edit(ProductId(3)), false);
        assert!(errors.get(FormField::Image).is_none());
    }

    #[test]
    fn test_price_minimum() {
        let mut form = valid_form();
        form.price = mask().encode("99");
        let errors = validate(&form, &mask(), FormMode::Create, true);
        assert!(errors.get(FormField::Price).is_some());

        form.price = mask().encode("100");
        let errors = validate(&form, &mask(), FormMode::Create, true);
        assert!(errors.get(FormField::Price).is_none());
    }

    #[test]
    fn test_unparseable_price_is_invalid_not_zero() {
        let mut form = valid_form();
        form.price = "abc".to_string();
        let errors = validate(&form, &mask(), FormMode::Create, true);
        assert!(errors.get(FormField::Price).is_some());
        assert!(form.to_create_dto(&mask(), String::new()).is_none());
    }

    #[test]
    fn test_ean_rules() {
        let mut form = valid_form();
        form.ean = "123".to_string();
        let errors = validate(&form, &mask(), FormMode::Create, true);
        assert_eq!(errors.get(FormField::Ean), Some("EAN deve ter 13 caracteres."));

        form.ean = "12345678901ab".to_string();
        let errors = validate(&form, &mask(), FormMode::Create, true);
        assert_eq!(errors.get(FormField::Ean), Some("EAN deve ser numérico."));
    }

    #[test]
    fn test_wants_ean_check() {
        let mut form = valid_form();
        assert!(form.wants_ean_check(None));
        assert!(!form.wants_ean_check(Some("7891234567895")));
        form.ean = "789123456789".to_string();
        assert!(!form.wants_ean_check(None));
    }

    #[test]
    fn test_create_dto_uses_decoded_price() {
        let dto = valid_form()
            .to_create_dto(&mask(), "images/new.png".to_string())
            .unwrap();
        assert_eq!(dto.price, 49.9);
        assert_eq!(dto.path_image, "images/new.png");
        assert_eq!(dto.sales_location, SalesLocation::Store);
    }

    #[test]
    fn test_edit_form_round_trips_stored_price() {
        let form = ProductForm::from_product(&stored(), &mask());
        assert_eq!(form.price, "R$\u{a0}49,90");
        let dto = form
            .to_update_dto(&stored(), &mask(), "images/camiseta.png".to_string())
            .unwrap();
        assert_eq!(dto.price, 49.9);
        assert_eq!(dto.ean, None);
        assert!(dto.active);
    }

    #[test]
    fn test_update_dto_carries_changed_ean_and_active() {
        let mut form = ProductForm::from_product(&stored(), &mask());
        form.ean = "7890000000001".to_string();
        form.active = false;
        let dto = form
            .to_update_dto(&stored(), &mask(), "images/camiseta.png".to_string())
            .unwrap();
        assert_eq!(dto.ean.as_deref(), Some("7890000000001"));
        assert!(!dto.active);
    }

    #[test]
    fn test_ean_check_resolve() {
        let checking = EanCheck::Checking("7891234567895".to_string());
        assert_eq!(
            checking.resolve("7891234567895", &Ok(())),
            Some(EanCheck::Available)
        );
        assert_eq!(
            checking.resolve("7891234567895", &Err(ApiError::Status(409))),
            Some(EanCheck::Taken)
        );
        assert_eq!(
            checking.resolve("7891234567895", &Err(ApiError::Network("offline".into()))),
            Some(EanCheck::Unchecked)
        );
    }

    #[test]
    fn test_ean_check_ignores_outdated_answer() {
        let checking = EanCheck::Checking("7890000000001".to_string());
        assert_eq!(checking.resolve("7891234567895", &Ok(())), None);
        assert_eq!(EanCheck::Unchecked.resolve("7891234567895", &Ok(())), None);
    }

    #[test]
    fn test_clear_field_error() {
        let mut errors = validate(&ProductForm::new(&mask()), &mask(), FormMode::Create, false);
        assert!(errors.get(FormField::Name).is_some());
        errors.clear(FormField::Name);
        assert!(errors.get(FormField::Name).is_none());
    }

    #[test]
    fn test_messages_follow_mode() {
        assert_eq!(FormMode::Create.saved_message(), "Produto cadastrado com sucesso!");
        assert_eq!(
            FormMode::Edit(ProductId(1)).failed_message(),
            "Erro ao atualizar o produto. Tente novamente."
        );
    }

    #[test]
    fn test_ean_check_blocks_submit() {
        assert!(EanCheck::Taken.blocks_submit());
        assert!(EanCheck::Checking("1".to_string()).blocks_submit());
        assert!(!EanCheck::Available.blocks_submit());
        assert!(!EanCheck::Unchecked.blocks_submit());
    }
}
