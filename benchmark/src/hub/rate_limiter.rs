//! @ai:module:intent Throttle outgoing registry requests
//! @ai:module:layer infrastructure
//! @ai:module:public_api RateLimiter
//! @ai:module:stateless false

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// @ai:intent Token bucket shared by every request a client sends
pub struct RateLimiter {
    /// None when throttling is disabled
    bucket: Option<Mutex<Bucket>>,
    per_second: f64,
    capacity: f64,
}

struct Bucket {
    tokens: f64,
    refilled_at: Instant,
}

impl Bucket {
    fn refill(&mut self, per_second: f64, capacity: f64) {
        let now = Instant::now();
        let earned = now.duration_since(self.refilled_at).as_secs_f64() * per_second;
        self.tokens = (self.tokens + earned).min(capacity);
        self.refilled_at = now;
    }
}

impl RateLimiter {
    /// @ai:intent Create a limiter allowing a burst of one minute's worth of requests
    /// @ai:pre requests_per_minute == 0 disables throttling
    /// @ai:effects pure
    pub fn new(requests_per_minute: u32) -> Self {
        let capacity = f64::from(requests_per_minute);
        let bucket = (requests_per_minute > 0).then(|| {
            Mutex::new(Bucket {
                tokens: capacity,
                refilled_at: Instant::now(),
            })
        });

        Self {
            bucket,
            per_second: capacity / 60.0,
            capacity,
        }
    }

    /// @ai:intent Wait until a request is allowed
    /// @ai:effects state:write, time
    pub async fn wait(&self) {
        let Some(bucket) = &self.bucket else {
            return;
        };

        loop {
            let pause = {
                let mut bucket = bucket.lock().await;
                bucket.refill(self.per_second, self.capacity);

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    return;
                }

                Duration::from_secs_f64((1.0 - bucket.tokens) / self.per_second)
            };

            tracing::debug!("Registry rate limit reached, waiting {:?}", pause);
            tokio::time::sleep(pause).await;
        }
    }
}
