use serde::Deserialize;

use crate::domain::types::Locale;

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_templates_dir() -> String {
    "templates/**/*".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_site_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_items_per_page() -> usize {
    10
}

fn default_simulated_latency_ms() -> u64 {
    300
}

/// Configuration options of the FinScope site.
///
/// Populated by the `config` crate from `config/*.yaml` and `APP__*`
/// environment variables; every field has a default.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Glob passed to `Tera::new`.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    /// Directory served under `/assets`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Directory holding `companies.json` and `reviews.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Public base URL used for canonical links, Open Graph and the sitemap.
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default)]
    pub default_locale: Locale,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    /// Artificial delay before each fixture load, in milliseconds.
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            templates_dir: default_templates_dir(),
            assets_dir: default_assets_dir(),
            data_dir: default_data_dir(),
            site_url: default_site_url(),
            default_locale: Locale::default(),
            items_per_page: default_items_per_page(),
            simulated_latency_ms: default_simulated_latency_ms(),
        }
    }
}

impl ServerConfig {
    /// Site URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }
}
