use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const DEFAULT_PROJECT_INTERVAL_SECS: u64 = 7;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn acquire(&self);
}

pub struct FixedInterval {
    interval: Duration,
    next_allowed: Mutex<Option<Instant>>,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_allowed: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RateLimiter for FixedInterval {
    async fn acquire(&self) {
        let mut next_allowed = self.next_allowed.lock().await;

        if let Some(at) = *next_allowed {
            tokio::time::sleep_until(at).await;
        }

        *next_allowed = Some(Instant::now() + self.interval);
    }
}

pub struct Unthrottled;

#[async_trait]
impl RateLimiter for Unthrottled {
    async fn acquire(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_is_immediate() {
        let limiter = FixedInterval::new(Duration::from_secs(7));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_are_spaced_by_interval() {
        let limiter = FixedInterval::new(Duration::from_secs(7));
        let start = Instant::now();

        for _ in 0..3 {
            limiter.acquire().await;
        }

        assert_eq!(start.elapsed(), Duration::from_secs(14));
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_work_counts_toward_interval() {
        let limiter = FixedInterval::new(Duration::from_secs(7));
        let start = Instant::now();

        limiter.acquire().await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        limiter.acquire().await;

        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_unthrottled() {
        let limiter = Unthrottled;
        for _ in 0..100 {
            limiter.acquire().await;
        }
    }
}
