use crate::config::types::{CatalogConfig, Config, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates catalog addressing
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let base = config.base()?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got '{}'",
            base.scheme()
        )));
    }

    // Relative joins drop the last path segment unless it ends in '/'
    if !base.path().ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url must end with '/', got '{}'",
            config.base_url
        )));
    }

    if config.catalogue_path.is_empty() || !config.catalogue_path.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "catalogue-path must be non-empty and end with '/', got '{}'",
            config.catalogue_path
        )));
    }

    if config.default_listing.is_empty() {
        return Err(ConfigError::Validation(
            "default-listing cannot be empty".to_string(),
        ));
    }

    config.catalogue_root()?;
    config.default_listing_url()?;

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact-email cannot be empty".to_string(),
        ));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| ConfigError::Validation(format!("Invalid email format: '{}'", email)))?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_base_url_must_end_with_slash() {
        let mut config = Config::default();
        config.catalog.base_url = "http://books.toscrape.com/shop".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_base_url_scheme() {
        let mut config = Config::default();
        config.catalog.base_url = "ftp://books.toscrape.com/".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        config.catalog.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_catalogue_path_must_be_directory() {
        let mut config = Config::default();
        config.catalog.catalogue_path = "catalogue".to_string();
        assert!(validate(&config).is_err());

        config.catalog.catalogue_path = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_crawler_name_characters() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "Book Trawler".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = "Book-Trawler2".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_json_path_required() {
        let mut config = Config::default();
        config.output.json_path = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }
}
