use std::time::Duration;

/// Sleep seam for the sampler's measurement window and the report loop.
/// Tests substitute a clock that records requested sleeps instead of waiting.
pub trait Clock {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
