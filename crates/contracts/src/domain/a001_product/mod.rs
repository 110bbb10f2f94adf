//! Product catalog contracts
//!
//! - aggregate.rs: the product record and the bodies sent to create/update it
//! - list.rs: list filters, the list query and the paginated list response

pub mod aggregate;
pub mod list;

pub use aggregate::{
    CreateProductDto, ImageUploadResponse, Product, ProductId, SalesLocation, UpdateProductDto,
};
pub use list::{ActiveStatusFilter, ProductListFilter, ProductListQuery, ProductListResponse, SalesLocationFilter};
