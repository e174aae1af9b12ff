use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
///
/// Seed URLs are deliberately left alone: a bad seed fails its own crawl
/// task instead of the whole run.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_domains must name at least one domain".to_string(),
        ));
    }

    for domain in &config.allowed_domains {
        validate_domain_pattern(domain)?;
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates a single allowed-domain entry
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    let pattern = pattern.trim();

    if pattern.is_empty() {
        return Err(ConfigError::Validation(
            "allowed domain cannot be empty".to_string(),
        ));
    }

    if pattern.contains("://") || pattern.contains('/') {
        return Err(ConfigError::InvalidUrl(format!(
            "allowed domain must be a bare host, got '{}'",
            pattern
        )));
    }

    let base = pattern.strip_prefix("*.").unwrap_or(pattern);
    if base.is_empty() || base.contains('*') {
        return Err(ConfigError::Validation(format!(
            "wildcards are only allowed as a leading '*.', got '{}'",
            pattern
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if config.crawler_name.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "crawler_name cannot contain whitespace, got '{}'",
            config.crawler_name
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    if config.log_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "log path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
