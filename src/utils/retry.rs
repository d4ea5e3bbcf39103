//! Caller-side retry for API operations
//!
//! The client pipeline never retries by itself. Callers that want retries
//! wrap an operation in [`RetryExecutor::execute`]; only transport failures
//! and 5xx API errors are retried by default.

use crate::Result;
use crate::error::{CustomError, ErrorKind};
use backoff::{ExponentialBackoff, backoff::Backoff};
use std::future::Future;
use std::time::Duration;

/// Retry configuration for API operations
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, the first one included
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
    /// Whether to retry on client errors (4xx)
    pub retry_client_errors: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
            retry_client_errors: false,
        }
    }
}

pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Execute an async operation with retry logic
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut backoff = ExponentialBackoff {
            initial_interval: self.config.initial_delay,
            max_interval: self.config.max_delay,
            multiplier: self.config.multiplier,
            max_elapsed_time: None,
            ..Default::default()
        };

        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if !self.should_retry(&error, attempt) {
                        return Err(error);
                    }

                    if let Some(delay) = backoff.next_backoff() {
                        log::debug!(
                            "Retrying after {:?} (attempt {}): {}",
                            delay,
                            attempt,
                            error
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        log::warn!(
                            "Max retry attempts reached ({}), giving up",
                            self.config.max_retries
                        );
                        return Err(error);
                    }
                }
            }
        }
    }

    /// Determine if an error should trigger a retry
    fn should_retry(&self, error: &CustomError, attempt: u32) -> bool {
        if attempt >= self.config.max_retries {
            return false;
        }

        match error.kind() {
            ErrorKind::Fetch => true,
            ErrorKind::Api => match error.status() {
                Some(500..=599) => true,
                Some(400..=499) => self.config.retry_client_errors,
                _ => false,
            },
            // Local input and schema drift do not change between attempts
            ErrorKind::Validation
            | ErrorKind::ApiModel
            | ErrorKind::Parse
            | ErrorKind::JsonDeserialize
            | ErrorKind::Generic => false,
        }
    }
}
