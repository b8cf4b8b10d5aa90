use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub time_window: Duration,
    pub burst_allowance: u32,
}

impl RateLimitConfig {
    /// The search endpoint allows 50 requests per 15 minute window for a
    /// cookie session.
    pub fn search_api() -> Self {
        Self {
            max_requests: 50,
            time_window: Duration::from_secs(15 * 60),
            burst_allowance: 5,
        }
    }
}

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Token bucket limiter for outbound feed requests. `acquire_permit`
/// sleeps until a token is available, so callers never see a rate error
/// from their own client.
#[derive(Debug)]
pub struct RateLimiter {
    state: Mutex<BucketState>,
    capacity: f64,
    refill_rate: f64, // tokens per second
    config: RateLimitConfig,
}

#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    pub available_tokens: f64,
    pub max_tokens: u32,
    pub requests_per_window: u32,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let capacity = config.burst_allowance as f64;
        let refill_rate = config.max_requests as f64 / config.time_window.as_secs_f64();

        Self {
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
            capacity,
            refill_rate,
            config,
        }
    }

    fn refill(&self, state: &mut BucketState) {
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill);
        state.tokens = (state.tokens + elapsed.as_secs_f64() * self.refill_rate).min(self.capacity);
        state.last_refill = now;
    }

    /// Takes one token, sleeping until the bucket refills if necessary.
    pub async fn acquire_permit(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                self.refill(&mut state);
                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    return;
                }
                Duration::from_secs_f64((1.0 - state.tokens) / self.refill_rate)
            };
            debug!("Rate limit bucket empty, waiting {:?}", wait);
            sleep(wait).await;
        }
    }

    pub async fn get_rate_limit_status(&self) -> RateLimitStatus {
        let mut state = self.state.lock().await;
        self.refill(&mut state);
        RateLimitStatus {
            available_tokens: state.tokens,
            max_tokens: self.config.burst_allowance,
            requests_per_window: self.config.max_requests,
        }
    }
}
