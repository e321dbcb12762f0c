//! Rate limiting utilities

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Rate limiter type alias
pub type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Create a rate limiter with the specified requests per second
pub fn create_limiter(requests_per_second: u32) -> Arc<Limiter> {
    let quota = Quota::per_second(NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

/// Max client messages per second per session. Clients report every
/// animation frame, so this sits well above a 60 fps display.
pub const CLIENT_MSG_RATE_LIMIT: u32 = 120;

/// Per-session rate limiter state
#[derive(Clone)]
pub struct SessionRateLimiter {
    limiter: Arc<Limiter>,
}

impl SessionRateLimiter {
    pub fn new() -> Self {
        Self::with_rate(CLIENT_MSG_RATE_LIMIT)
    }

    pub fn with_rate(per_second: u32) -> Self {
        Self {
            limiter: create_limiter(per_second),
        }
    }

    /// Check if a client message is allowed (returns true if allowed)
    pub fn check(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl Default for SessionRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
