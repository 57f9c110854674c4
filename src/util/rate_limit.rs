//! Rate limiting utilities

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::ws::protocol::ControllerMsg;

/// Rate limiter type alias
pub type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Create a rate limiter with the specified requests per second
pub fn create_limiter(requests_per_second: u32) -> Arc<Limiter> {
    let quota = Quota::per_second(NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

/// Button edges per second a single controller may send. A human tapping
/// both buttons produces four edges per tap, well under this.
pub const CONTROLLER_RATE_LIMIT: u32 = 60;

/// Per-controller rate limiter state
#[derive(Clone)]
pub struct ControllerRateLimiter {
    input_limiter: Arc<Limiter>,
}

impl ControllerRateLimiter {
    pub fn new() -> Self {
        Self::with_limit(CONTROLLER_RATE_LIMIT)
    }

    pub fn with_limit(per_second: u32) -> Self {
        Self {
            input_limiter: create_limiter(per_second),
        }
    }

    /// Check if a button message is allowed (returns true if allowed)
    pub fn check_input(&self) -> bool {
        self.input_limiter.check().is_ok()
    }

    /// Release edges always pass so a dropped message can never latch a
    /// button down; presses draw from the quota.
    pub fn admit(&self, msg: &ControllerMsg) -> bool {
        !msg.pressed || self.check_input()
    }
}

impl Default for ControllerRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
