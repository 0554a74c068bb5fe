use crate::error::ApiError;
use std::future::Future;
use std::time::Duration;

/// Retry policy for command-layer fetches. The API client and the fetcher
/// never retry on their own; commands opt in through this executor.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try
    pub max_retries: u32,
    /// Delay between attempts
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            delay: Duration::from_millis(500),
        }
    }
}

/// Retry executor with a bounded attempt count
pub struct RetryExecutor {
    config: RetryConfig,
}

impl RetryExecutor {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Execute an async operation, retrying transient failures
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if attempt > self.config.max_retries || !is_transient(&error) {
                        return Err(error);
                    }
                    tokio::time::sleep(self.config.delay).await;
                }
            }
        }
    }
}

/// Server errors, timeouts and transport failures are worth a second try;
/// client errors and auth rejections are not.
fn is_transient(error: &ApiError) -> bool {
    match error {
        ApiError::Timeout { .. } => true,
        ApiError::Network { .. } => true,
        ApiError::Http {
            status: 500..=599, ..
        } => true,
        ApiError::Http { .. } => false,
        ApiError::Unauthorized { .. } => false,
    }
}

/// Convenience wrapper using the default policy
pub async fn with_retry<F, Fut, T>(operation: F) -> Result<T, ApiError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let executor = RetryExecutor::new(RetryConfig::default());
    executor.execute(operation).await
}
