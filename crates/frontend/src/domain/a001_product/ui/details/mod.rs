//! Product create/edit form
//!
//! MVVM layout:
//! - model.rs: form values, validation rules, DTO building
//! - view_model.rs: ViewModel with signals and commands (load, EAN check, submit)
//! - view.rs: Leptos components, including the create and edit routes

mod model;
mod view;
mod view_model;

pub use view::{ProductCreatePage, ProductDetails, ProductEditPage};
pub use view_model::ProductDetailsViewModel;
