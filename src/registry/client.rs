//! HTTP client shared by proxy-backed version sources
//!
//! Requests are retried with exponential backoff on rate limiting, server
//! errors and transport failures. Not-found answers are final.

use crate::error::FetchError;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = concat!("modcheck/", env!("CARGO_PKG_VERSION"));

/// How often and how patiently a request is repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }
}

/// What to do with a response status
#[derive(Debug)]
enum Outcome {
    Success,
    Retry(FetchError),
    Fail(FetchError),
}

fn judge_status(status: StatusCode, module: &str, source: &str) -> Outcome {
    if status.is_success() {
        return Outcome::Success;
    }
    match status {
        StatusCode::TOO_MANY_REQUESTS => Outcome::Retry(FetchError::rate_limited(source)),
        // The Go proxy answers 410 Gone for modules it refuses to serve
        StatusCode::NOT_FOUND | StatusCode::GONE => {
            Outcome::Fail(FetchError::module_not_found(module, source))
        }
        s if s.is_server_error() => {
            Outcome::Retry(FetchError::network(module, source, format!("HTTP {}", s)))
        }
        s => Outcome::Fail(FetchError::network(module, source, format!("HTTP {}", s))),
    }
}

/// Cloneable HTTP client with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Client with the default timeout, user agent and retry policy
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                FetchError::network("", "HTTP client", format!("cannot build client: {}", e))
            })?;

        Ok(Self {
            client,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// GET `url`, retrying transient failures
    ///
    /// `module` and `source` only label errors.
    pub async fn get(&self, url: &str, module: &str, source: &str) -> Result<Response, FetchError> {
        let mut attempt = 0;

        loop {
            debug!(url, attempt, "GET");

            let error = match self.client.get(url).send().await {
                Ok(response) => match judge_status(response.status(), module, source) {
                    Outcome::Success => return Ok(response),
                    Outcome::Fail(error) => return Err(error),
                    Outcome::Retry(error) => error,
                },
                Err(e) if e.is_timeout() => FetchError::timeout(module, source),
                Err(e) => FetchError::network(module, source, e.to_string()),
            };

            if attempt >= self.retry.max_retries {
                return Err(error);
            }
            debug!(url, attempt, %error, "retrying");
            tokio::time::sleep(self.retry.delay_for(attempt)).await;
            attempt += 1;
        }
    }

    /// GET `url` and decode a JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        module: &str,
        source: &str,
    ) -> Result<T, FetchError> {
        self.get(url, module, source)
            .await?
            .json::<T>()
            .await
            .map_err(|e| FetchError::invalid_response(module, source, format!("bad JSON: {}", e)))
    }

    /// GET `url` and return the body as text
    pub async fn get_text(
        &self,
        url: &str,
        module: &str,
        source: &str,
    ) -> Result<String, FetchError> {
        self.get(url, module, source)
            .await?
            .text()
            .await
            .map_err(|e| {
                FetchError::invalid_response(module, source, format!("unreadable body: {}", e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.retry_policy(), RetryPolicy::default());
        assert!(HttpClient::with_config(Duration::from_secs(5), "test-agent/1.0").is_ok());
    }

    #[test]
    fn test_custom_retry_policy() {
        let policy = RetryPolicy {
            max_retries: 0,
            base_delay: Duration::from_millis(1),
        };
        let client = HttpClient::new().unwrap().with_retry_policy(policy);
        assert_eq!(client.retry_policy().max_retries, 0);
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }

    #[test]
    fn test_user_agent() {
        assert!(DEFAULT_USER_AGENT.starts_with("modcheck/"));
    }

    #[test]
    fn test_judge_status() {
        assert!(matches!(judge_status(StatusCode::OK, "m", "p"), Outcome::Success));
        assert!(matches!(
            judge_status(StatusCode::GONE, "m", "p"),
            Outcome::Fail(FetchError::ModuleNotFound { .. })
        ));
        assert!(matches!(
            judge_status(StatusCode::NOT_FOUND, "m", "p"),
            Outcome::Fail(FetchError::ModuleNotFound { .. })
        ));
        assert!(matches!(
            judge_status(StatusCode::TOO_MANY_REQUESTS, "m", "p"),
            Outcome::Retry(FetchError::RateLimited { .. })
        ));
        assert!(matches!(
            judge_status(StatusCode::BAD_GATEWAY, "m", "p"),
            Outcome::Retry(FetchError::Network { .. })
        ));
        assert!(matches!(
            judge_status(StatusCode::FORBIDDEN, "m", "p"),
            Outcome::Fail(FetchError::Network { .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = HttpClient::new().unwrap().with_retry_policy(RetryPolicy {
            max_retries: 1,
            base_delay: Duration::from_millis(1),
        });
        let err = client
            .get_text("http://127.0.0.1:9/x/@v/list", "x", "Go Proxy")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Network { .. } | FetchError::Timeout { .. }
        ));
    }
}
