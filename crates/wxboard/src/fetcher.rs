use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde_json::Value;
use slog::{debug, Logger};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Failed to send request to {url}: {reason}")]
    Send { url: String, reason: String },
    #[error("Request to {url} returned {status}")]
    Status { url: String, status: StatusCode },
    #[error("Failed to read json body from {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Source of raw json documents, one per url.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// When `fresh` is set, caches between us and the origin are asked to revalidate.
    async fn fetch_json(&self, url: &str, fresh: bool) -> Result<Value, FetchError>;
}

pub struct HttpFetcher {
    logger: Logger,
    client: ClientWithMiddleware,
}

impl HttpFetcher {
    /// `retries` of 0 sends every request exactly once.
    pub fn new(logger: Logger, user_agent: &str, retries: u32) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;
        let mut builder = ClientBuilder::new(client);
        if retries > 0 {
            let retry_policy = ExponentialBackoff::builder().build_with_max_retries(retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }
        Ok(HttpFetcher {
            logger,
            client: builder.build(),
        })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str, fresh: bool) -> Result<Value, FetchError> {
        debug!(self.logger, "requesting: {} (fresh: {})", url, fresh);
        let mut request = self.client.get(url).header(header::ACCEPT, "application/json");
        if fresh {
            request = request
                .header(header::CACHE_CONTROL, "no-cache")
                .header(header::PRAGMA, "no-cache");
        }

        let response = request.send().await.map_err(|e| FetchError::Send {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        response.json::<Value>().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
