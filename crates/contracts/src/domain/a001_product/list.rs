use serde::{Deserialize, Serialize};

use super::aggregate::{Product, SalesLocation};

/// Sales-location axis of the list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SalesLocationFilter {
    #[default]
    All,
    Only(SalesLocation),
}

impl SalesLocationFilter {
    pub const OPTIONS: [SalesLocationFilter; 3] = [
        SalesLocationFilter::All,
        SalesLocationFilter::Only(SalesLocation::Store),
        SalesLocationFilter::Only(SalesLocation::Event),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SalesLocationFilter::All => "all",
            SalesLocationFilter::Only(location) => location.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SalesLocationFilter::All => "Todos",
            SalesLocationFilter::Only(location) => location.label(),
        }
    }

    /// Unknown values fall back to `All`
    pub fn parse(value: &str) -> Self {
        SalesLocation::parse(value)
            .map(SalesLocationFilter::Only)
            .unwrap_or_default()
    }
}

/// Active-status axis of the list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveStatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActiveStatusFilter {
    pub const OPTIONS: [ActiveStatusFilter; 3] = [
        ActiveStatusFilter::All,
        ActiveStatusFilter::Active,
        ActiveStatusFilter::Inactive,
    ];

    /// Form value of the status select
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveStatusFilter::All => "all",
            ActiveStatusFilter::Active => "true",
            ActiveStatusFilter::Inactive => "false",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActiveStatusFilter::All => "Todos",
            ActiveStatusFilter::Active => "Ativo",
            ActiveStatusFilter::Inactive => "Inativo",
        }
    }

    /// Unknown values fall back to `All`
    pub fn parse(value: &str) -> Self {
        match value {
            "true" => ActiveStatusFilter::Active,
            "false" => ActiveStatusFilter::Inactive,
            _ => ActiveStatusFilter::All,
        }
    }

    /// `is_active` query value, `None` means the parameter is omitted
    pub fn query_value(&self) -> Option<u8> {
        match self {
            ActiveStatusFilter::All => None,
            ActiveStatusFilter::Active => Some(1),
            ActiveStatusFilter::Inactive => Some(0),
        }
    }
}

/// Filters of the product list. One value per axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductListFilter {
    pub name: String,
    pub status: ActiveStatusFilter,
    pub location: SalesLocationFilter,
}

impl ProductListFilter {
    /// Number of axes that narrow the result set
    pub fn active_count(&self) -> usize {
        let mut count = 0;
        if !self.name.is_empty() {
            count += 1;
        }
        if self.status != ActiveStatusFilter::All {
            count += 1;
        }
        if self.location != SalesLocationFilter::All {
            count += 1;
        }
        count
    }
}

/// Query of `GET /products`
///
/// Field order is the parameter order on the wire. Axes set to "all" are
/// omitted rather than sent as a sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListQuery {
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_location: Option<SalesLocation>,
}

impl ProductListQuery {
    pub fn new(filter: &ProductListFilter, page: u32) -> Self {
        Self {
            page,
            search: (!filter.name.is_empty()).then(|| filter.name.clone()),
            is_active: filter.status.query_value(),
            sales_location: match filter.location {
                SalesLocationFilter::All => None,
                SalesLocationFilter::Only(location) => Some(location),
            },
        }
    }
}

/// Paginated response of `GET /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub items: Vec<Product>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}
