use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replaces `output.path`
    pub output_path: Option<String>,

    /// Comma-separated seed list replacing `crawler.seeds`
    pub urls: Option<String>,

    /// Replaces `crawler.allowed-domains` when non-empty
    pub allowed_domains: Vec<String>,

    /// Replaces `output.log-path`
    pub log_path: Option<String>,
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use paragraph_crawl::config::load_config;
///
/// let config = load_config(Path::new("crawl.toml")).unwrap();
/// println!("Seeds: {}", config.crawler.seeds.len());
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Builds the effective configuration for a run
///
/// Starts from the file at `path` (or the built-in defaults when `None`),
/// applies command-line overrides, and validates the result.
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    apply_overrides(&mut config, overrides);
    validate(&config)?;

    Ok(config)
}

/// Applies command-line overrides in place
pub fn apply_overrides(config: &mut Config, overrides: Overrides) {
    if let Some(output_path) = overrides.output_path {
        config.output.path = output_path;
    }

    if let Some(urls) = overrides.urls.filter(|u| !u.is_empty()) {
        config.crawler.seeds = parse_url_list(&urls);
    }

    if !overrides.allowed_domains.is_empty() {
        config.crawler.allowed_domains = overrides.allowed_domains;
    }

    if let Some(log_path) = overrides.log_path {
        config.output.log_path = log_path;
    }
}

/// Splits a comma-separated URL list
///
/// Entries are trimmed and empty entries dropped. Duplicates are kept: each
/// one is crawled independently.
///
/// # Example
///
/// ```
/// use paragraph_crawl::config::parse_url_list;
///
/// let urls = parse_url_list("https://a.org/x, https://b.org/y,,");
/// assert_eq!(urls, vec!["https://a.org/x", "https://b.org/y"]);
/// ```
pub fn parse_url_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
