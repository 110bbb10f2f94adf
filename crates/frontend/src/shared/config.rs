//! Application configuration
//!
//! Built once at startup and handed to everything that talks to the API or
//! renders prices. Nothing reads the environment after that.
//!
//! Compile-time overrides (read by `option_env!`):
//! - `CATALOG_API_URL`: API base, e.g. `https://catalog.example.com`
//! - `CATALOG_STATIC_URL`: image base, defaults to `{api_base}/static`

use crate::shared::money_mask::{CurrencyFormat, MoneyMask};

const API_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base: String,
    pub static_base: String,
    pub currency: CurrencyFormat,
}

impl AppConfig {
    pub fn new(api_base: impl Into<String>, static_base: Option<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        let static_base = static_base
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("{}/static", api_base));
        Self {
            api_base,
            static_base,
            currency: CurrencyFormat::BRL,
        }
    }

    /// Configuration from build-time variables, falling back to the page origin
    pub fn from_env() -> Self {
        let api_base = option_env!("CATALOG_API_URL")
            .map(str::to_string)
            .unwrap_or_else(window_api_base);
        let static_base = option_env!("CATALOG_STATIC_URL").map(str::to_string);
        let config = Self::new(api_base, static_base);
        log::info!(
            "Catalog API at {} (static assets at {})",
            config.api_base,
            config.static_base
        );
        config
    }

    /// Build a full API URL from a path starting with `/`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    pub fn money_mask(&self) -> MoneyMask {
        MoneyMask::new(self.currency)
    }
}

/// Same host as the page, API port.
/// Empty string if window is not available.
fn window_api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_base_defaults_under_api() {
        let config = AppConfig::new("http://localhost:3000/", None);
        assert_eq!(config.api_base, "http://localhost:3000");
        assert_eq!(config.static_base, "http://localhost:3000/static");
        assert_eq!(config.api_url("/products"), "http://localhost:3000/products");
    }

    #[test]
    fn test_explicit_static_base() {
        let config = AppConfig::new(
            "https://api.example.com",
            Some("https://cdn.example.com/img/".to_string()),
        );
        assert_eq!(config.static_base, "https://cdn.example.com/img");
        assert_eq!(config.currency, CurrencyFormat::BRL);
    }
}
