// FILE: crates/network/src/client.rs

//! HTTP client wrapper with retry

use crate::error::{NetworkError, NetworkResult};
use bytes::Bytes;
use dlshelf_resilience::{retry_async, RetryPolicy};
use log::debug;
use reqwest::Client as ReqwestClient;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Retry policy for transient failures
    pub retry_policy: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("dlshelf/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
            retry_policy: RetryPolicy::new(3).with_initial_delay(Duration::from_millis(500)),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }
}

/// HTTP client shared by every fetch task
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    inner: ReqwestClient,
    config: ClientConfig,
}

impl Client {
    /// Creates a new client with default configuration
    pub fn new() -> NetworkResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> NetworkResult<Self> {
        let inner = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| NetworkError::Setup(e.to_string()))?;

        Ok(Self { inner, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads the full response body
    ///
    /// Client errors (4xx) are returned at once; transport errors and server
    /// errors (5xx) are retried according to the retry policy.
    pub async fn get_bytes(&self, url: &str) -> NetworkResult<Bytes> {
        retry_async(&self.config.retry_policy, NetworkError::is_retryable, || {
            self.get_once(url)
        })
        .await
    }

    /// Downloads the response body as text
    pub async fn get_text(&self, url: &str) -> NetworkResult<String> {
        let body = self.get_bytes(url).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn get_once(&self, url: &str) -> NetworkResult<Bytes> {
        let response = self.inner.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!("GET {} returned {}", url, status);
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?)
    }
}
