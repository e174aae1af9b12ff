use serde::Deserialize;

/// Seed pages crawled when neither the config file nor `--urls` names any
pub const DEFAULT_SEEDS: &[&str] = &[
    "https://en.wikipedia.org/wiki/Robotics",
    "https://en.wikipedia.org/wiki/Robot",
    "https://en.wikipedia.org/wiki/Reinforcement_learning",
    "https://en.wikipedia.org/wiki/Robot_Operating_System",
    "https://en.wikipedia.org/wiki/Intelligent_agent",
    "https://en.wikipedia.org/wiki/Software_agent",
    "https://en.wikipedia.org/wiki/Robotic_process_automation",
    "https://en.wikipedia.org/wiki/Chatbot",
    "https://en.wikipedia.org/wiki/Applications_of_artificial_intelligence",
    "https://en.wikipedia.org/wiki/Android_(robot)",
];

/// Domain the default seed set lives on
pub const DEFAULT_ALLOWED_DOMAIN: &str = "en.wikipedia.org";

/// Output file used when no path is configured
pub const DEFAULT_OUTPUT_PATH: &str = "output/results.jl";

/// Log file used when no path is configured
pub const DEFAULT_LOG_PATH: &str = "logs/run.log";

/// Main configuration structure for Paragraph-Crawl
///
/// Every section may be omitted from the TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Hosts the fetcher may visit (e.g., "en.wikipedia.org" or "*.example.org")
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// Seed URLs, one fetch each
    pub seeds: Vec<String>,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            allowed_domains: vec![DEFAULT_ALLOWED_DOMAIN.to_string()],
            seeds: DEFAULT_SEEDS.iter().map(|s| s.to_string()).collect(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
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
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the JSON Lines output file
    pub path: String,

    /// Path to the log file
    #[serde(rename = "log-path")]
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            log_path: DEFAULT_LOG_PATH.to_string(),
        }
    }
}
