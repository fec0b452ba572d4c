//! Bounded fixed-delay retry for list fetches
//!
//! Only automatic loads go through here; manual refresh buttons call the
//! API once.

use std::future::Future;

use gloo_timers::future::TimeoutFuture;

use super::api_utils::ApiError;
use super::config::RetryConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed after the first one
    pub retries: u32,
    pub delay_ms: u32,
}

impl RetryPolicy {
    /// Single attempt, no retry
    pub const NONE: RetryPolicy = RetryPolicy {
        retries: 0,
        delay_ms: 0,
    };

    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            retries: config.department_retries,
            delay_ms: config.delay_ms,
        }
    }

    /// Delay before another attempt, or `None` to give up and return the
    /// outcome as is. `attempt` is the number of attempts made so far.
    /// Errors and empty lists are retried.
    pub fn next_delay<T>(&self, attempt: u32, outcome: &Result<Vec<T>, ApiError>) -> Option<u32> {
        let retryable = match outcome {
            Ok(list) => list.is_empty(),
            Err(_) => true,
        };
        (retryable && attempt <= self.retries).then_some(self.delay_ms)
    }
}

/// Run `fetch` until it yields a non-empty list or the policy is exhausted
pub async fn fetch_list_with_retry<T, F, Fut>(
    policy: RetryPolicy,
    what: &str,
    mut fetch: F,
) -> Result<Vec<T>, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<T>, ApiError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        let outcome = fetch().await;
        match policy.next_delay(attempt, &outcome) {
            Some(delay) => {
                match &outcome {
                    Ok(_) => log::warn!("{} came back empty (attempt {}), retrying", what, attempt),
                    Err(e) => log::warn!("{} failed (attempt {}): {}, retrying", what, attempt, e),
                }
                TimeoutFuture::new(delay).await;
            }
            None => return outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            retries: 2,
            delay_ms: 1500,
        }
    }

    #[test]
    fn test_success_stops_immediately() {
        let ok: Result<Vec<u8>, ApiError> = Ok(vec![1]);
        assert_eq!(policy().next_delay(1, &ok), None);
    }

    #[test]
    fn test_empty_and_errors_are_retried_until_exhausted() {
        let empty: Result<Vec<u8>, ApiError> = Ok(vec![]);
        let failed: Result<Vec<u8>, ApiError> = Err(ApiError::Network("offline".into()));

        assert_eq!(policy().next_delay(1, &empty), Some(1500));
        assert_eq!(policy().next_delay(2, &failed), Some(1500));
        assert_eq!(policy().next_delay(3, &failed), None);
        assert_eq!(policy().next_delay(3, &empty), None);
    }

    #[test]
    fn test_none_policy_never_retries() {
        let failed: Result<Vec<u8>, ApiError> = Err(ApiError::NotFound);
        assert_eq!(RetryPolicy::NONE.next_delay(1, &failed), None);
    }

    #[test]
    fn test_from_config() {
        let p = RetryPolicy::from_config(&RetryConfig {
            department_retries: 4,
            delay_ms: 250,
        });
        assert_eq!(p, RetryPolicy { retries: 4, delay_ms: 250 });
    }
}
