use crate::config::ttl::parse_ttl;
use crate::config::types::{CacheConfig, CacheSettings, Config, CrawlConfig, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_cache_config(&config.cache)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    parse_base_url(&config.base_url)?;

    if config.language.trim().is_empty() {
        return Err(ConfigError::Validation(
            "language cannot be empty".to_string(),
        ));
    }

    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if let Some(folder) = &config.folder {
        if folder.trim().is_empty() {
            return Err(ConfigError::Validation(
                "cache folder cannot be empty when set".to_string(),
            ));
        }
    }

    if parse_ttl(&config.ttl)? == Duration::ZERO {
        return Err(ConfigError::Validation(format!(
            "cache ttl must be greater than zero, got '{}'",
            config.ttl
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_path.is_empty() {
        return Err(ConfigError::Validation(
            "data_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Parses the site root, accepting only http and https
fn parse_base_url(base_url: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            base_url
        )));
    }

    Ok(url)
}

impl TryFrom<&Config> for CrawlConfig {
    type Error = ConfigError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        validate(config)?;

        let cache = match &config.cache.folder {
            Some(folder) => Some(CacheSettings {
                folder: PathBuf::from(folder),
                ttl: parse_ttl(&config.cache.ttl)?,
            }),
            None => None,
        };

        Ok(CrawlConfig {
            base_url: parse_base_url(&config.crawler.base_url)?,
            language: config.crawler.language.trim().to_string(),
            concurrency: config.crawler.concurrency as usize,
            cache,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        Config {
            crawler: CrawlerConfig {
                base_url: "https://www.spreadthesign.com".to_string(),
                language: "en.us".to_string(),
                concurrency: 8,
            },
            cache: CacheConfig::default(),
            output: OutputConfig {
                data_path: "./data.json".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&create_test_config()).is_ok());
    }

    #[test]
    fn test_concurrency_bounds() {
        let mut config = create_test_config();
        config.crawler.concurrency = 0;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        config.crawler.concurrency = 101;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));

        config.crawler.concurrency = 1;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_base_url_must_be_http() {
        let mut config = create_test_config();
        config.crawler.base_url = "ftp://example.com".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.crawler.base_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_empty_language_rejected() {
        let mut config = create_test_config();
        config.crawler.language = "  ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_ttl_rejected() {
        let mut config = create_test_config();
        config.cache.ttl = "forever".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidDuration(_))
        ));

        config.cache.ttl = "0s".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_crawl_config_without_cache_folder() {
        let crawl = CrawlConfig::try_from(&create_test_config()).unwrap();
        assert!(crawl.cache.is_none());
        assert_eq!(crawl.concurrency, 8);
        assert_eq!(crawl.language, "en.us");
    }

    #[test]
    fn test_crawl_config_with_cache_folder() {
        let mut config = create_test_config();
        config.cache.folder = Some("./cache".to_string());
        config.cache.ttl = "2d".to_string();

        let crawl = CrawlConfig::try_from(&config).unwrap();
        let cache = crawl.cache.unwrap();
        assert_eq!(cache.folder, PathBuf::from("./cache"));
        assert_eq!(cache.ttl, Duration::from_secs(2 * 86_400));
    }
}
