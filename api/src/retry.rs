use http::StatusCode;
use reqwest::{blocking::Response, Result};
use std::sync::atomic::{AtomicBool, Ordering::SeqCst};
use std::thread::sleep;
use std::time::Duration;

/// When read requests should be retried.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RetryStrategy {
    /// The first request made by the client is not retried, later ones are. An endpoint which
    /// cannot be reached at all fails fast, while transient failures half way through a
    /// reconciliation are smoothed over.
    Automatic,
    /// Always retry.
    Always,
}

/// Retry settings for idempotent (GET) requests. Writes are never retried by the client.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    pub strategy: RetryStrategy,
    /// Maximum number of retries after the initial attempt.
    pub max_retry_count: u8,
    /// Wait before the first retry.
    pub base_wait: Duration,
    /// The wait before retry N is `base_wait * backoff_factor^N`.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            strategy: RetryStrategy::Automatic,
            max_retry_count: 5,
            base_wait: Duration::from_secs(1),
            backoff_factor: 2.0,
        }
    }
}

impl RetryConfig {
    fn wait_before(&self, i_retry: u8) -> Duration {
        self.base_wait
            .mul_f64(self.backoff_factor.powi(i_retry.into()))
    }
}

#[derive(Debug)]
pub(crate) struct Retrier {
    config: RetryConfig,
    is_first_request: AtomicBool,
}

impl Retrier {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            is_first_request: AtomicBool::new(true),
        }
    }

    fn should_retry(status: StatusCode) -> bool {
        status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
    }

    pub fn with_retries(&self, send_request: impl Fn() -> Result<Response>) -> Result<Response> {
        if self.is_first_request.swap(false, SeqCst)
            && self.config.strategy == RetryStrategy::Automatic
        {
            return send_request();
        }

        for i_retry in 0..self.config.max_retry_count {
            let reason = match send_request() {
                Ok(response) if Self::should_retry(response.status()) => {
                    format!("{} for {}", response.status(), response.url())
                }
                Err(error) if error.is_timeout() || error.is_connect() => error.to_string(),
                result => return result,
            };

            let wait = self.config.wait_before(i_retry);
            log::warn!("{} - retrying after {:?}.", reason, wait);
            sleep(wait);
        }

        // Out of retries, whatever comes back now is final.
        send_request()
    }
}
