use super::model::{
    validate, EanCheck, FieldErrors, FormField, FormMode, ProductForm, EAN_LENGTH,
    EAN_TAKEN_MESSAGE, LOAD_FAILED_MESSAGE,
};
use crate::domain::a001_product::api::ProductApi;
use crate::shared::api_error::ApiError;
use crate::shared::money_mask::MoneyMask;
use crate::shared::toast::ToastService;
use contracts::domain::a001_product::{Product, SalesLocation};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use std::rc::Rc;

/// ViewModel for the product create/edit form
#[derive(Clone)]
pub struct ProductDetailsViewModel {
    pub mode: FormMode,
    pub form: RwSignal<ProductForm>,
    /// Record as loaded from the API (edit mode only)
    pub stored: RwSignal<Option<Product>>,
    pub errors: RwSignal<FieldErrors>,
    pub ean_check: RwSignal<EanCheck>,
    pub loading: RwSignal<bool>,
    pub submitting: RwSignal<bool>,
    pub image_name: RwSignal<Option<String>>,
    image: StoredValue<Option<web_sys::File>, LocalStorage>,
    api: ProductApi,
    mask: MoneyMask,
    toast: ToastService,
}

impl ProductDetailsViewModel {
    pub fn new(mode: FormMode, api: ProductApi, mask: MoneyMask, toast: ToastService) -> Self {
        Self {
            mode,
            form: RwSignal::new(ProductForm::new(&mask)),
            stored: RwSignal::new(None),
            errors: RwSignal::new(FieldErrors::default()),
            ean_check: RwSignal::new(EanCheck::Unchecked),
            loading: RwSignal::new(mode.is_edit()),
            submitting: RwSignal::new(false),
            image_name: RwSignal::new(None),
            image: StoredValue::new_local(None),
            api,
            mask,
            toast,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.mode.is_edit()
    }

    /// Reactive: drives the disabled state of the submit button
    pub fn can_submit(&self) -> bool {
        !self.loading.get()
            && !self.submitting.get()
            && !self.ean_check.with(EanCheck::blocks_submit)
            && (!self.is_edit_mode() || self.stored.with(Option::is_some))
    }

    /// Same check for commands, without subscribing to the signals
    fn can_submit_untracked(&self) -> bool {
        !self.loading.get_untracked()
            && !self.submitting.get_untracked()
            && !self.ean_check.with_untracked(EanCheck::blocks_submit)
            && (!self.is_edit_mode() || self.stored.with_untracked(Option::is_some))
    }

    /// Message under a field, including the EAN conflict
    pub fn field_error(&self, field: FormField) -> Option<&'static str> {
        let message = self.errors.with(|e| e.get(field));
        if field == FormField::Ean && message.is_none() && self.ean_check.get() == EanCheck::Taken
        {
            return Some(EAN_TAKEN_MESSAGE);
        }
        message
    }

    /// Load the stored product in edit mode
    pub fn load_if_needed(&self) {
        let FormMode::Edit(id) = self.mode else {
            return;
        };
        let vm = self.clone();
        spawn_local(async move {
            match vm.api.fetch_product(id).await {
                Ok(product) => {
                    vm.form.set(ProductForm::from_product(&product, &vm.mask));
                    vm.image_name
                        .set(Some(product.image_file_name().to_string()));
                    vm.stored.set(Some(product));
                }
                Err(e) => {
                    log::error!("Failed to load product {:?}: {}", id, e);
                    vm.toast.error(LOAD_FAILED_MESSAGE);
                }
            }
            vm.loading.set(false);
        });
    }

    pub fn set_name(&self, value: String) {
        self.form.update(|f| f.name = value);
        self.errors.update(|e| e.clear(FormField::Name));
    }

    pub fn set_description(&self, value: String) {
        self.form.update(|f| f.description = value);
        self.errors.update(|e| e.clear(FormField::Description));
    }

    pub fn set_sales_location(&self, location: SalesLocation) {
        self.form.update(|f| f.sales_location = Some(location));
        self.errors.update(|e| e.clear(FormField::SalesLocation));
    }

    pub fn set_active(&self, active: bool) {
        self.form.update(|f| f.active = active);
    }

    /// Re-mask the price on every keystroke
    pub fn set_price(&self, raw: String) {
        let masked = self.mask.encode(&raw);
        self.form.update(|f| f.price = masked);
        self.errors.update(|e| e.clear(FormField::Price));
    }

    pub fn set_image(&self, file: Option<web_sys::File>) {
        if let Some(file) = &file {
            self.image_name.set(Some(file.name()));
            self.errors.update(|e| e.clear(FormField::Image));
        }
        self.image.set_value(file);
    }

    /// Update the EAN and check it against the API once it is complete
    pub fn set_ean(&self, raw: String) {
        let ean: String = raw.chars().take(EAN_LENGTH).collect();
        self.form.update(|f| f.ean = ean.clone());
        self.errors.update(|e| e.clear(FormField::Ean));

        let stored_ean = self
            .stored
            .with_untracked(|s| s.as_ref().map(|p| p.ean.clone()));
        let wants_check = self
            .form
            .with_untracked(|f| f.wants_ean_check(stored_ean.as_deref()));
        if !wants_check {
            self.ean_check.set(EanCheck::Unchecked);
            return;
        }

        self.ean_check.set(EanCheck::Checking(ean.clone()));
        let vm = self.clone();
        spawn_local(async move {
            let result = vm.api.validate_ean(&ean).await;
            if let Err(ApiError::Network(e)) = &result {
                log::warn!("EAN check failed: {}", e);
            }
            let next = vm.ean_check.with_untracked(|c| c.resolve(&ean, &result));
            if let Some(next) = next {
                log::debug!("EAN {} -> {:?}", ean, next);
                vm.ean_check.set(next);
            }
        });
    }

    /// Validate, upload the image when needed and save the product
    pub fn submit(&self, on_saved: Rc<dyn Fn(())>) {
        if !self.can_submit_untracked() {
            return;
        }

        let form = self.form.get_untracked();
        let image = self.image.get_value();
        let errors = validate(&form, &self.mask, self.mode, image.is_some());
        let is_valid = errors.is_empty();
        self.errors.set(errors);
        if !is_valid {
            log::debug!("product form has validation errors");
            return;
        }

        self.submitting.set(true);
        let vm = self.clone();
        spawn_local(async move {
            let result = vm.save(form, image).await;
            vm.submitting.set(false);
            match result {
                Ok(()) => {
                    vm.toast.success(vm.mode.saved_message());
                    (on_saved)(());
                }
                Err(e) => {
                    log::error!("Failed to save product: {}", e);
                    vm.toast.error(vm.mode.failed_message());
                }
            }
        });
    }

    async fn save(&self, form: ProductForm, image: Option<web_sys::File>) -> Result<(), ApiError> {
        let invalid = || ApiError::Serialize("product form is not valid".to_string());

        match self.mode {
            FormMode::Create => {
                let file = image.ok_or_else(invalid)?;
                let path_image = self.api.upload_image(&file).await?;
                let dto = form.to_create_dto(&self.mask, path_image).ok_or_else(invalid)?;
                self.api.create_product(&dto).await
            }
            FormMode::Edit(id) => {
                let stored = self.stored.get_untracked().ok_or_else(invalid)?;
                let path_image = match image {
                    Some(file) => self.api.upload_image(&file).await?,
                    None => stored.path_image.clone(),
                };
                let dto = form
                    .to_update_dto(&stored, &self.mask, path_image)
                    .ok_or_else(invalid)?;
                self.api.update_product(id, &dto).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::AppConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn create_vm() -> ProductDetailsViewModel {
        let config = AppConfig::new("http://localhost:3000", None);
        ProductDetailsViewModel::new(
            FormMode::Create,
            ProductApi::new(config.clone()),
            config.money_mask(),
            ToastService::new(),
        )
    }

    #[test]
    fn test_submit_gate_follows_state() {
        let owner = Owner::new();
        owner.set();

        let vm = create_vm();
        assert!(vm.can_submit_untracked());

        vm.ean_check.set(EanCheck::Taken);
        assert!(!vm.can_submit_untracked());

        vm.ean_check.set(EanCheck::Available);
        vm.submitting.set(true);
        assert!(!vm.can_submit_untracked());
    }

    #[test]
    fn test_submit_gate_does_not_subscribe() {
        let owner = Owner::new();
        owner.set();

        let vm = create_vm();
        let runs = Arc::new(AtomicUsize::new(0));
        let gate = Memo::new({
            let vm = vm.clone();
            let runs = Arc::clone(&runs);
            move |_| {
                runs.fetch_add(1, Ordering::SeqCst);
                vm.can_submit_untracked()
            }
        });

        assert!(gate.get());
        vm.submitting.set(true);
        // nothing was tracked, so the memo is not recomputed
        assert!(gate.get());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
