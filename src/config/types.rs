use crate::ConfigError;
use serde::Deserialize;
use url::Url;

/// Main configuration structure for Book-Trawler
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Where the catalog lives and how its pages are addressed
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog root; its index page lists every category
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path prefix (relative to the root) that detail links resolve against
    #[serde(rename = "catalogue-path")]
    pub catalogue_path: String,

    /// Listing crawled when no category names are requested
    #[serde(rename = "default-listing")]
    pub default_listing: String,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "http://books.toscrape.com/".to_string(),
            catalogue_path: "catalogue/".to_string(),
            default_listing: "catalogue/category/books_1/index.html".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl CatalogConfig {
    /// Parses the catalog root
    pub fn base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", self.base_url, e)))
    }

    /// Absolute URL that detail-page links resolve against
    pub fn catalogue_root(&self) -> Result<Url, ConfigError> {
        join_config_path(&self.base()?, &self.catalogue_path, "catalogue-path")
    }

    /// Absolute URL of the "all books" listing
    pub fn default_listing_url(&self) -> Result<Url, ConfigError> {
        join_config_path(&self.base()?, &self.default_listing, "default-listing")
    }
}

fn join_config_path(base: &Url, path: &str, key: &str) -> Result<Url, ConfigError> {
    base.join(path)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, path, e)))
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "BookTrawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/book-trawler".to_string(),
            contact_email: "trawler@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON file records are persisted to
    #[serde(rename = "json-path")]
    pub json_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: "BooksInJSON.json".to_string(),
        }
    }
}
