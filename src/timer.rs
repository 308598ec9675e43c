use std::time::Duration;

/// Periodic timer driven by elapsed wall time.
///
/// The runtime hands out elapsed durations of whatever length the event loop
/// happened to take; the timer accumulates them and reports how many whole
/// periods have passed. A cancelled timer never fires again.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    carry: Duration,
    active: bool,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            // a zero period would fire forever inside a single advance
            period: period.max(Duration::from_millis(1)),
            carry: Duration::ZERO,
            active: true,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance by `elapsed` and return the number of periods that completed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.active {
            return 0;
        }

        self.carry += elapsed;
        let mut fired = 0;
        while self.carry >= self.period {
            self.carry -= self.period;
            fired += 1;
        }
        fired
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.carry = Duration::ZERO;
    }
}

/// One-shot timer: fires once after `delay`, then stays inert.
#[derive(Debug, Clone)]
pub struct Timeout {
    inner: IntervalTimer,
}

impl Timeout {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: IntervalTimer::new(delay),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.is_active()
    }

    /// Returns true exactly once, on the advance that crosses the delay.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.inner.advance(elapsed) > 0 {
            self.inner.cancel();
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}
