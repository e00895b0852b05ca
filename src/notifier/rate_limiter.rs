//! Rate limiting for outbound deliveries.
//!
//! Provides token bucket pacing so a large subscriber list does not hit the
//! email provider faster than its quota allows.

use governor::{Quota, RateLimiter as GovLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

type DirectLimiter = GovLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A rate limiter for controlling delivery speed.
///
/// Clones share the same bucket, so every per-subscriber task draws from
/// one budget.
pub struct RateLimiter {
    limiter: Arc<DirectLimiter>,
}

impl RateLimiter {
    /// Create a limiter allowing `rate` deliveries per second.
    ///
    /// Returns `None` for a rate of 0, which means unlimited.
    pub fn new(rate: u32) -> Option<Self> {
        let rate = NonZeroU32::new(rate)?;
        Some(Self {
            limiter: Arc::new(GovLimiter::direct(Quota::per_second(rate))),
        })
    }

    /// Wait until a token is available.
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }
}

impl Clone for RateLimiter {
    fn clone(&self) -> Self {
        Self {
            limiter: Arc::clone(&self.limiter),
        }
    }
}
