//! @ai:module:intent Bounded retries with linear backoff for transient registry failures
//! @ai:module:layer infrastructure
//! @ai:module:public_api RetryPolicy, with_retry

use crate::config::HubConfig;
use crate::hub::client::TransportError;
use std::future::Future;
use std::time::Duration;

/// @ai:intent How often and how patiently to retry a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &HubConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// @ai:intent Delay before the given retry (1-based)
    /// @ai:example (backoff=500ms, 3) -> 1500ms
    /// @ai:effects pure
    fn delay(&self, retry: u32) -> Duration {
        self.backoff.saturating_mul(retry)
    }
}

/// @ai:intent Run an operation, retrying transient failures up to the policy's bound
/// @ai:post non-transient errors are returned after a single attempt
/// @ai:effects time, plus whatever the operation does
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, TransportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TransportError>>,
{
    let mut retry = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && retry < policy.max_retries => {
                retry += 1;
                let delay = policy.delay(retry);
                tracing::warn!(
                    "Registry request failed ({}), retry {}/{} in {:?}",
                    e,
                    retry,
                    policy.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            backoff: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let attempts = AtomicU32::new(0);

        let result = with_retry(&policy(3), || async {
            if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(TransportError::Unreachable("reset".to_string()))
            } else {
                Ok("models")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "models");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_bound() {
        let attempts = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&policy(2), || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Status {
                status: 502,
                body: String::new(),
            })
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let attempts = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&policy(5), || async {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Status {
                status: 401,
                body: "unauthorized".to_string(),
            })
        })
        .await;

        assert!(matches!(result, Err(TransportError::Status { status: 401, .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_backoff_is_linear() {
        let policy = RetryPolicy {
            max_retries: 3,
            backoff: Duration::from_millis(500),
        };
        assert_eq!(policy.delay(3), Duration::from_millis(1500));
    }
}
