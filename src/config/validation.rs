use crate::config::types::{Config, CrawlerConfig, FetchConfig, OutputConfig, WalkerConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_walker_config(&config.walker)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", config.base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if config.delay_ms < 100 || config.delay_ms > 60_000 {
        return Err(ConfigError::Validation(format!(
            "delay_ms must be between 100 and 60000, got {}ms",
            config.delay_ms
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates request timeouts
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("page_timeout_secs", config.page_timeout_secs),
        ("download_timeout_secs", config.download_timeout_secs),
        ("connect_timeout_secs", config.connect_timeout_secs),
    ] {
        if value == 0 {
            return Err(ConfigError::Validation(format!("{} must be >= 1", name)));
        }
    }

    Ok(())
}

/// Validates walker caps (when set)
fn validate_walker_config(config: &WalkerConfig) -> Result<(), ConfigError> {
    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max_pages must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("documents_path", &config.documents_path),
        ("titles_path", &config.titles_path),
        ("log_path", &config.log_path),
        ("download_dir", &config.download_dir),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
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
    fn test_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.crawler.base_url = "ftp://example.com/apa".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        config.crawler.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_delay_bounds() {
        let mut config = Config::default();
        config.crawler.delay_ms = 99;
        assert!(validate(&config).is_err());

        config.crawler.delay_ms = 100;
        assert!(validate(&config).is_ok());

        config.crawler.delay_ms = 60_001;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.fetch.download_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_walker_caps() {
        let mut config = Config::default();
        config.walker.max_pages = Some(0);
        assert!(validate(&config).is_err());

        config.walker.max_pages = Some(1);
        config.walker.max_depth = Some(0);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_output_path_rejected() {
        let mut config = Config::default();
        config.output.titles_path.clear();
        assert!(validate(&config).is_err());
    }
}
