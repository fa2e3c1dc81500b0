use std::thread;
use std::time::Duration;

/// Delay strategy applied before each metadata request.
pub trait Throttle {
    fn wait(&self);
}

/// Sleep a fixed interval between requests. The search service has no
/// published rate limit; a constant pause keeps the crawl polite.
#[derive(Debug)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn from_millis(millis: u64) -> Self {
        Self {
            delay: Duration::from_millis(millis),
        }
    }
}

impl Throttle for FixedDelay {
    fn wait(&self) {
        thread::sleep(self.delay);
    }
}

/// No throttling; used by tests.
#[derive(Debug)]
pub struct NoDelay;

impl Throttle for NoDelay {
    fn wait(&self) {}
}
