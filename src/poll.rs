//! Async Confirmation Poller
//!
//! Fixed-interval polling with a deadline, shared by webhook test delivery
//! and camera snapshot readiness.

use crate::error::{ProvisionError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Outcome of a single status check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStatus<T> {
    /// Not finished yet, check again after the interval
    Pending,
    /// Terminal state reached
    Ready(T),
}

/// How often to check and how long to keep trying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollPolicy {
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl PollPolicy {
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Webhook test deliveries: 2s between checks, give up after a minute
    pub const fn webhook_default() -> Self {
        Self::new(Duration::from_secs(2), Duration::from_secs(60))
    }

    /// Snapshots are usually ready within a couple of seconds
    pub const fn snapshot_default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(30))
    }
}

/// Poll `check` until it reports `Ready`, an error, or the policy's timeout.
///
/// The first check happens one interval after the call, since callers have
/// just triggered the operation being waited on. Errors from `check` are
/// returned as-is without further polling. A check still in flight when the
/// deadline passes is dropped and counts as a timeout.
pub async fn poll_until<T, F, Fut>(label: &str, policy: &PollPolicy, mut check: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<PollStatus<T>>>,
{
    let start = Instant::now();
    let mut attempts: u32 = 0;
    let timed_out = |attempts| ProvisionError::PollTimeout {
        label: label.to_string(),
        timeout: policy.timeout,
        attempts,
    };

    loop {
        tokio::time::sleep(policy.interval).await;
        attempts += 1;

        let remaining = policy.timeout.saturating_sub(start.elapsed());
        let status = match tokio::time::timeout(remaining, check()).await {
            Ok(status) => status?,
            Err(_) => {
                tracing::debug!("{} check cut off at the deadline (attempt {})", label, attempts);
                return Err(timed_out(attempts));
            }
        };

        match status {
            PollStatus::Ready(value) => {
                tracing::debug!("{} ready after {} attempts", label, attempts);
                return Ok(value);
            }
            PollStatus::Pending => {
                tracing::debug!("{} still pending (attempt {})", label, attempts);
            }
        }

        if start.elapsed() >= policy.timeout {
            return Err(timed_out(attempts));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fast_policy() -> PollPolicy {
        PollPolicy::new(Duration::from_millis(5), Duration::from_millis(500))
    }

    #[tokio::test]
    async fn test_returns_once_ready() {
        let calls = Cell::new(0);
        let result = poll_until("job", &fast_policy(), || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 3 {
                    Ok(PollStatus::Pending)
                } else {
                    Ok(PollStatus::Ready(n))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_times_out_when_never_ready() {
        let policy = PollPolicy::new(Duration::from_millis(5), Duration::from_millis(30));
        let result: Result<()> = poll_until("stuck job", &policy, || async { Ok(PollStatus::Pending) }).await;

        match result {
            Err(ProvisionError::PollTimeout { label, attempts, .. }) => {
                assert_eq!(label, "stuck job");
                assert!(attempts >= 1);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_check_error_stops_polling() {
        let calls = Cell::new(0);
        let result: Result<()> = poll_until("job", &fast_policy(), || {
            calls.set(calls.get() + 1);
            async { Err(ProvisionError::InvalidResponse("boom".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(ProvisionError::InvalidResponse(_))));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_slow_check_is_cut_off_at_deadline() {
        let policy = PollPolicy::new(Duration::from_millis(5), Duration::from_millis(50));
        let start = Instant::now();
        let result: Result<()> = poll_until("slow job", &policy, || async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(PollStatus::Pending)
        })
        .await;

        match result {
            Err(ProvisionError::PollTimeout { label, attempts, .. }) => {
                assert_eq!(label, "slow job");
                assert_eq!(attempts, 1);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_policy_serde_uses_human_durations() {
        let policy: PollPolicy = serde_json::from_str(r#"{"interval": "250ms", "timeout": "10s"}"#).unwrap();
        assert_eq!(policy.interval, Duration::from_millis(250));
        assert_eq!(policy.timeout, Duration::from_secs(10));

        let json = serde_json::to_value(PollPolicy::webhook_default()).unwrap();
        assert_eq!(json["interval"], "2s");
        let back: PollPolicy = serde_json::from_value(json).unwrap();
        assert_eq!(back, PollPolicy::webhook_default());
    }
}
