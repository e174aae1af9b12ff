//! Configuration module for Paragraph-Crawl
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and merging command-line overrides into it.
//!
//! # Example
//!
//! ```no_run
//! use paragraph_crawl::config::{resolve_config, Overrides};
//! use std::path::Path;
//!
//! let config = resolve_config(Some(Path::new("crawl.toml")), Overrides::default()).unwrap();
//! println!("Writing to {}", config.output.path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_ALLOWED_DOMAIN,
    DEFAULT_LOG_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_SEEDS,
};

// Re-export parser functions
pub use parser::{apply_overrides, load_config, parse_config, parse_url_list, resolve_config, Overrides};
