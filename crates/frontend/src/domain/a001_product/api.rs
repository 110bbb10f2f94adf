use contracts::domain::a001_product::{
    CreateProductDto, ImageUploadResponse, Product, ProductId, ProductListQuery,
    ProductListResponse, UpdateProductDto,
};
use contracts::domain::common::AggregateId;
use gloo_net::http::{Request, Response};

use crate::shared::api_error::ApiError;
use crate::shared::config::AppConfig;

/// Render the list query, `?page=N[&search=..][&is_active=..][&sales_location=..]`
pub fn list_query_string(query: &ProductListQuery) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Serialize(e.to_string()))?;
    Ok(format!("?{}", qs))
}

fn ensure_ok(response: &Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Status(response.status()))
    }
}

fn browser_err(e: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Browser(format!("{e:?}"))
}

/// Client of the catalog API
#[derive(Debug, Clone, PartialEq)]
pub struct ProductApi {
    config: AppConfig,
}

impl ProductApi {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// One page of products
    pub async fn list_products(
        &self,
        query: &ProductListQuery,
    ) -> Result<ProductListResponse, ApiError> {
        let url = self
            .config
            .api_url(&format!("/products{}", list_query_string(query)?));
        log::debug!("GET {}", url);

        let response = Request::get(&url).send().await?;
        ensure_ok(&response)?;
        Ok(response.json::<ProductListResponse>().await?)
    }

    pub async fn fetch_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let url = self
            .config
            .api_url(&format!("/products/{}", id.as_string()));
        log::debug!("GET {}", url);

        let response = Request::get(&url).send().await?;
        ensure_ok(&response)?;
        Ok(response.json::<Product>().await?)
    }

    /// `Ok` when the EAN is free. A non-success status means it is already
    /// registered; transport failures come back as `ApiError::Network`.
    pub async fn validate_ean(&self, ean: &str) -> Result<(), ApiError> {
        let url = self
            .config
            .api_url(&format!("/validate/ean/{}", urlencoding::encode(ean)));
        log::debug!("GET {}", url);

        let response = Request::get(&url).send().await?;
        ensure_ok(&response)
    }

    /// Upload an image as multipart form data, returns the stored path
    pub async fn upload_image(&self, file: &web_sys::File) -> Result<String, ApiError> {
        let url = self.config.api_url("/images");
        log::debug!("POST {} ({} bytes)", url, file.size());

        let form = web_sys::FormData::new().map_err(browser_err)?;
        form.append_with_blob("file", file).map_err(browser_err)?;

        let response = Request::post(&url).body(form)?.send().await?;
        ensure_ok(&response)?;
        let uploaded = response.json::<ImageUploadResponse>().await?;
        Ok(uploaded.file_path)
    }

    pub async fn create_product(&self, dto: &CreateProductDto) -> Result<(), ApiError> {
        let url = self.config.api_url("/products");
        log::debug!("POST {}", url);

        let response = Request::post(&url).json(dto)?.send().await?;
        ensure_ok(&response)
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        dto: &UpdateProductDto,
    ) -> Result<(), ApiError> {
        let url = self
            .config
            .api_url(&format!("/products/{}", id.as_string()));
        log::debug!("PUT {}", url);

        let response = Request::put(&url).json(dto)?.send().await?;
        ensure_ok(&response)
    }
}
