//! arXiv search client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Rate limiting (one request per 3 s by default)
//! - Response caching with 5-minute TTL

mod atom;

use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use moka::future::Cache;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

pub use atom::parse_feed;

use crate::config::Config;
use crate::error::{ClientError, ClientResult};
use crate::models::PaperRecord;

/// A source of candidate papers for a topic.
#[async_trait::async_trait]
pub trait PaperSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Return up to `max_results` candidate records, most relevant first.
    async fn search(&self, topic: &str, max_results: u32) -> ClientResult<Vec<PaperRecord>>;
}

/// arXiv Atom API client.
#[derive(Clone)]
pub struct ArxivClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Search result cache, absent when caching is disabled.
    cache: Option<Cache<String, Vec<PaperRecord>>>,

    /// Request pacing, absent when the delay is zero.
    limiter: Option<Arc<DefaultDirectRateLimiter>>,

    /// Query endpoint.
    api_url: String,

    /// Request timeout, reported on timeouts.
    request_timeout: Duration,
}

impl ArxivClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("research-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let cache = (config.cache_max_size > 0 && !config.cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(config.cache_max_size)
                .time_to_live(config.cache_ttl)
                .build()
        });

        let limiter = Quota::with_period(config.rate_limit_delay)
            .map(|quota| Arc::new(RateLimiter::direct(quota)));

        Ok(Self {
            client,
            cache,
            limiter,
            api_url: config.arxiv_api_url.clone(),
            request_timeout: config.request_timeout,
        })
    }

    /// Fetch and parse one page of results.
    async fn fetch(&self, topic: &str, max_results: u32) -> ClientResult<Vec<PaperRecord>> {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }

        let params = [
            ("search_query", format!("all:{topic}")),
            ("start", "0".to_string()),
            ("max_results", max_results.to_string()),
            ("sortBy", "relevance".to_string()),
        ];

        let response = self
            .client
            .get(&self.api_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let response = Self::handle_response(response).await?;
        let body = response.text().await?;

        atom::parse_feed(&body)
    }

    fn map_send_error(&self, err: reqwest_middleware::Error) -> ClientError {
        match err {
            reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
                ClientError::Timeout(self.request_timeout)
            }
            reqwest_middleware::Error::Reqwest(e) => ClientError::Http(e),
            other => ClientError::Middleware(other),
        }
    }

    /// Handle API response status codes.
    async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        match (status.as_u16(), retry_after) {
            (429, retry_after) => Err(ClientError::rate_limited(retry_after.unwrap_or(60))),
            (503, Some(seconds)) => Err(ClientError::rate_limited(seconds)),
            (code @ 500..=599, _) => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(code, text))
            }
            (code, _) => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: code, message: text })
            }
        }
    }
}

#[async_trait::async_trait]
impl PaperSource for ArxivClient {
    fn name(&self) -> &'static str {
        "arxiv"
    }

    async fn search(&self, topic: &str, max_results: u32) -> ClientResult<Vec<PaperRecord>> {
        let cache_key = format!("{topic}\u{1f}{max_results}");
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&cache_key).await {
                tracing::debug!(topic, max_results, "Serving search from cache");
                return Ok(cached);
            }
        }

        let records = self.fetch(topic, max_results).await?;
        tracing::info!(topic, max_results, found = records.len(), "arXiv search finished");

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, records.clone()).await;
        }
        Ok(records)
    }
}

impl std::fmt::Debug for ArxivClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArxivClient")
            .field("api_url", &self.api_url)
            .field("cached", &self.cache.is_some())
            .field("rate_limited", &self.limiter.is_some())
            .finish()
    }
}
