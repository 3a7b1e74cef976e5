//! Configuration for the research MCP server.
//!
//! A single [`Config`] value is built at startup and handed to every
//! component constructor; nothing reads the environment after that.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// arXiv API constants.
pub mod api {
    use std::time::Duration;

    /// arXiv Atom query endpoint.
    pub const ARXIV_API: &str = "https://export.arxiv.org/api/query";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// arXiv asks clients to wait three seconds between requests.
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_secs(3);

    /// Retries for transient failures (5xx, 429, connection errors).
    pub const MAX_RETRIES: u32 = 3;

    /// Search response cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum cached searches.
    pub const CACHE_MAX_SIZE: u64 = 256;
}

/// Store layout constants.
pub mod storage {
    /// Collection file inside each topic directory.
    pub const COLLECTION_FILE: &str = "papers_info.json";

    /// Metadata file written next to the collection file.
    pub const METADATA_FILE: &str = "papers_meta.json";
}

/// Log levels accepted by `MCP_LOG_LEVEL`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "warning", "error"];

/// Transports accepted by `MCP_TRANSPORT`.
pub const TRANSPORTS: &[&str] = &["stdio", "http"];

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server name reported on `initialize`.
    pub server_name: String,

    /// Transport name (stdio or http).
    pub transport: String,

    /// Base directory for data.
    pub base_dir: PathBuf,

    /// Store root: one sub-directory per topic.
    pub papers_dir: PathBuf,

    /// Collection file name inside each topic directory.
    pub collection_file: String,

    /// Indentation width for written JSON.
    pub json_indent: usize,

    /// Create the store root on startup.
    pub create_dirs: bool,

    /// Default number of search results.
    pub max_results_default: u32,

    /// Upper bound on search results.
    pub max_results_limit: u32,

    /// Log level (tracing filter directive).
    pub log_level: String,

    /// arXiv query endpoint (overridable for mock servers).
    pub arxiv_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Minimum delay between arXiv requests.
    pub rate_limit_delay: Duration,

    /// Retries for transient arXiv failures.
    pub max_retries: u32,

    /// Cache TTL.
    pub cache_ttl: Duration,

    /// Maximum cache size.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a configuration rooted at `base_dir` with default settings.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            server_name: "research".to_string(),
            transport: "stdio".to_string(),
            papers_dir: base_dir.join("data").join("papers"),
            base_dir,
            collection_file: storage::COLLECTION_FILE.to_string(),
            json_indent: 2,
            create_dirs: true,
            max_results_default: 5,
            max_results_limit: 50,
            log_level: "info".to_string(),
            arxiv_api_url: api::ARXIV_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: api::RATE_LIMIT_DELAY,
            max_retries: api::MAX_RETRIES,
            cache_ttl: api::CACHE_TTL,
            cache_max_size: api::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration: store under `base_dir`, arXiv at `api_url`.
    #[must_use]
    pub fn for_testing(base_dir: &Path, api_url: &str) -> Self {
        Self {
            arxiv_api_url: format!("{}/api/query", api_url.trim_end_matches('/')),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::ZERO, // No delay in tests
            max_retries: 0,
            cache_ttl: Duration::ZERO,        // No caching in tests
            cache_max_size: 0,
            ..Self::new(base_dir)
        }
    }

    /// Create configuration from environment variables (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns error if a numeric variable does not parse or the result
    /// fails [`Config::validate`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let base_dir = std::env::var("MCP_BASE_DIR").unwrap_or_else(|_| ".".to_string());
        let mut config = Self::new(base_dir);

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server_name = name;
        }
        if let Ok(transport) = std::env::var("MCP_TRANSPORT") {
            config.transport = transport.to_lowercase();
        }
        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.log_level = level.to_lowercase();
        }
        if let Ok(url) = std::env::var("MCP_ARXIV_API_URL") {
            config.arxiv_api_url = url;
        }
        if let Some(n) = env_parse("MCP_ARXIV_MAX_RESULTS")? {
            config.max_results_default = n;
        }
        if let Some(n) = env_parse("MCP_ARXIV_MAX_RESULTS_LIMIT")? {
            config.max_results_limit = n;
        }
        if let Some(n) = env_parse("MCP_ARXIV_MAX_RETRIES")? {
            config.max_retries = n;
        }
        if let Some(secs) = env_parse::<f64>("MCP_ARXIV_DELAY_SECONDS")? {
            config.rate_limit_delay = Duration::try_from_secs_f64(secs)
                .map_err(|e| anyhow::anyhow!("MCP_ARXIV_DELAY_SECONDS={secs}: {e}"))?;
        }
        if let Some(n) = env_parse("MCP_JSON_INDENT")? {
            config.json_indent = n;
        }
        if let Ok(flag) = std::env::var("MCP_CREATE_DIRS") {
            config.create_dirs = flag.eq_ignore_ascii_case("true");
        }

        config.validate()?;
        Ok(config)
    }

    /// Check settings for consistency.
    ///
    /// # Errors
    ///
    /// Returns error when the default result count exceeds the limit, or the
    /// log level or transport is unknown.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_results_default > self.max_results_limit {
            anyhow::bail!(
                "Default max results ({}) cannot exceed limit ({})",
                self.max_results_default,
                self.max_results_limit
            );
        }
        if self.max_results_default == 0 {
            anyhow::bail!("Default max results must be at least 1");
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.log_level);
        }
        if !TRANSPORTS.contains(&self.transport.as_str()) {
            anyhow::bail!("Invalid transport: {}", self.transport);
        }
        Ok(())
    }

    /// Clamp a requested result count to `1..=max_results_limit`.
    #[must_use]
    pub fn clamp_max_results(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.max_results_default)
            .clamp(1, self.max_results_limit)
    }

    /// Create the store root if configured to.
    ///
    /// # Errors
    ///
    /// Returns the I/O error from directory creation.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        if self.create_dirs {
            std::fs::create_dir_all(&self.papers_dir)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(".")
    }
}

fn env_parse<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{key}={raw:?} is not valid: {e}")),
        Err(_) => Ok(None),
    }
}
