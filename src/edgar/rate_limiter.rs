use std::time::Duration;

use once_cell::sync::OnceCell;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Spaces outbound EDGAR requests so that consecutive calls are at least
/// `min_interval` apart. The lock is held across the sleep, so callers are
/// sequenced FIFO even if a future extension introduces concurrency.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

static EDGAR_RATE_LIMITER: OnceCell<RateLimiter> = OnceCell::new();

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        RateLimiter {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Blocks until the minimum interval since the previous call has
    /// elapsed, then records the new call time.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Process-wide limiter shared by every outbound EDGAR call.
    pub fn edgar() -> &'static RateLimiter {
        EDGAR_RATE_LIMITER.get_or_init(RateLimiter::default)
    }

    /// Like [`RateLimiter::edgar`], but seeds the shared limiter with a
    /// custom interval. Has no effect if the limiter was already created.
    pub fn configure_edgar(min_interval: Duration) -> &'static RateLimiter {
        EDGAR_RATE_LIMITER.get_or_init(|| RateLimiter::new(min_interval))
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL) // SEC allows 10 requests per second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_call_does_not_wait() {
        let limiter = RateLimiter::new(Duration::from_millis(100));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn consecutive_calls_are_spaced_by_min_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(100));
        let start = Instant::now();
        for _ in 0..4 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_callers_pay_no_extra_wait() {
        let limiter = RateLimiter::new(Duration::from_millis(100));
        limiter.acquire().await;
        tokio::time::sleep(Duration::from_millis(250)).await;
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
