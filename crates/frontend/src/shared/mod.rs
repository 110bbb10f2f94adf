pub mod api_error;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod icons;
pub mod money_mask;
pub mod toast;
