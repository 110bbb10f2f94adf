use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Product identifier assigned by the catalog API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(ProductId::new)
            .map_err(|e| format!("Invalid product id: {}", e))
    }
}

// ============================================================================
// Sales location
// ============================================================================

/// Where a product is sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesLocation {
    #[default]
    Event,
    Store,
}

impl SalesLocation {
    pub const ALL: [SalesLocation; 2] = [SalesLocation::Event, SalesLocation::Store];

    /// Wire value, also used as the form value of the radio inputs
    pub fn as_str(&self) -> &'static str {
        match self {
            SalesLocation::Event => "event",
            SalesLocation::Store => "store",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SalesLocation::Event => "Evento",
            SalesLocation::Store => "Loja",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "event" => Some(SalesLocation::Event),
            "store" => Some(SalesLocation::Store),
            _ => None,
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Product as returned by the catalog API. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub active: bool,
    /// Relative to the static asset base
    pub path_image: String,
    pub ean: String,
    pub created_at: String,
    /// Only single-product reads carry it
    #[serde(default)]
    pub sales_location: Option<SalesLocation>,
}

impl Product {
    /// Full URL of the product image under the given static base
    pub fn image_url(&self, static_base: &str) -> String {
        format!(
            "{}/{}",
            static_base.trim_end_matches('/'),
            self.path_image.trim_start_matches('/')
        )
    }

    /// Stored price in minor units (cents)
    pub fn price_cents(&self) -> u64 {
        if self.price.is_finite() && self.price > 0.0 {
            (self.price * 100.0).round() as u64
        } else {
            0
        }
    }

    /// File name part of the stored image path
    pub fn image_file_name(&self) -> &str {
        self.path_image
            .rsplit('/')
            .next()
            .unwrap_or(self.path_image.as_str())
    }
}

// ============================================================================
// Write bodies
// ============================================================================

/// Body of `POST /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductDto {
    pub name: String,
    pub ean: String,
    pub price: f64,
    pub description: String,
    pub sales_location: SalesLocation,
    pub path_image: String,
}

/// Body of `PUT /products/{id}`
///
/// `ean` is left out of the JSON entirely when it was not changed, the API
/// would otherwise reject the product's own EAN as already registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ean: Option<String>,
    pub price: f64,
    pub description: String,
    pub sales_location: SalesLocation,
    pub path_image: String,
    pub active: bool,
}

impl UpdateProductDto {
    /// `Some(edited)` only when the EAN differs from the stored one
    pub fn changed_ean(stored: &str, edited: &str) -> Option<String> {
        if stored == edited {
            None
        } else {
            Some(edited.to_string())
        }
    }
}

/// Response of `POST /images`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    pub file_path: String,
}
