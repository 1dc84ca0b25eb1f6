use std::time::Instant;

use crate::foundation::core::Millis;

/// Source of "now" for the stream driver.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Manually advanced clock for tests and headless simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct VirtualClock {
    now: Millis,
}

impl VirtualClock {
    pub fn new(start: Millis) -> Self {
        Self { now: start }
    }

    pub fn advance(&mut self, by: Millis) -> Millis {
        self.now = self.now + by;
        self.now
    }

    /// Move to `at`. Time never runs backwards.
    pub fn set(&mut self, at: Millis) {
        self.now = self.now.max(at);
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Millis {
        self.now
    }
}

/// Wall clock measured from construction.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        let ms = self.origin.elapsed().as_millis();
        Millis(u64::try_from(ms).unwrap_or(u64::MAX))
    }
}
