//! Exponential backoff for rate-limited searches
//!
//! Only rate-limit responses are retried. An empty result or any other
//! failure ends the search at once.

use std::time::Duration;

use super::search::SearchError;

/// Retry settings for the photo search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each following one
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// Delay before retry number `attempt + 1`: `initial_delay * 2^attempt`
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Run `search` until it yields a result or the policy gives up
    ///
    /// Makes at most `max_retries + 1` calls. `sleep` is invoked with the
    /// backoff delay between rate-limited attempts.
    pub fn run<F, S>(&self, query: &str, mut search: F, mut sleep: S) -> Option<String>
    where
        F: FnMut() -> Result<Option<String>, SearchError>,
        S: FnMut(Duration),
    {
        for attempt in 0..=self.max_retries {
            match search() {
                Ok(Some(url)) => return Some(url),
                Ok(None) => {
                    log::info!("No images found for keyword: {}", query);
                    return None;
                }
                Err(SearchError::RateLimited) if attempt < self.max_retries => {
                    let delay = self.backoff(attempt);
                    log::warn!(
                        "Rate limit hit for '{}'. Waiting {}s before retry ({}/{})...",
                        query,
                        delay.as_secs_f64(),
                        attempt + 1,
                        self.max_retries
                    );
                    sleep(delay);
                }
                Err(SearchError::RateLimited) => {
                    log::warn!(
                        "Rate limit exceeded for '{}' after {} retries. Skipping.",
                        query,
                        self.max_retries
                    );
                    return None;
                }
                Err(e) => {
                    log::warn!("Error searching images for '{}': {}", query, e);
                    return None;
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_secs(2))
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = policy();
        assert_eq!(policy.backoff(0), Duration::from_secs(2));
        assert_eq!(policy.backoff(1), Duration::from_secs(4));
        assert_eq!(policy.backoff(2), Duration::from_secs(8));
    }

    #[test]
    fn test_success_after_two_rate_limits() {
        let policy = policy();
        let mut calls = 0;
        let mut slept = Duration::ZERO;

        let result = policy.run(
            "absorb",
            || {
                calls += 1;
                if calls <= 2 {
                    Err(SearchError::RateLimited)
                } else {
                    Ok(Some("https://images.example.com/absorb.jpeg".to_string()))
                }
            },
            |d| slept += d,
        );

        assert_eq!(result.as_deref(), Some("https://images.example.com/absorb.jpeg"));
        assert_eq!(calls, 3);
        // initial_delay * (2^0 + 2^1)
        assert_eq!(slept, Duration::from_secs(2 * (1 + 2)));
    }

    #[test]
    fn test_always_rate_limited_exhausts() {
        for max_retries in [0, 1, 3, 5] {
            let policy = RetryPolicy::new(max_retries, Duration::from_millis(10));
            let mut calls = 0;
            let mut sleeps = 0;

            let result = policy.run(
                "absorb",
                || {
                    calls += 1;
                    Err(SearchError::RateLimited)
                },
                |_| sleeps += 1,
            );

            assert!(result.is_none());
            assert_eq!(calls, max_retries + 1);
            assert_eq!(sleeps, max_retries);
        }
    }

    #[test]
    fn test_empty_result_not_retried() {
        let mut calls = 0;
        let result = policy().run(
            "zzxq",
            || {
                calls += 1;
                Ok(None)
            },
            |_| panic!("should not sleep"),
        );

        assert!(result.is_none());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_other_failure_not_retried() {
        let mut calls = 0;
        let result = policy().run(
            "absorb",
            || {
                calls += 1;
                Err(SearchError::Server { status: 500 })
            },
            |_| panic!("should not sleep"),
        );

        assert!(result.is_none());
        assert_eq!(calls, 1);
    }
}
