//! Timer abstractions used by the carousel.
//!
//! The browser front end backs [`IntervalTimer`] with `setInterval`; tests use
//! [`ManualInterval`], which only moves when told to.

/// A cancellable repeating timer. At most one schedule is pending at a time.
pub trait IntervalTimer {
    /// Cancel any pending schedule and start a new one firing every `period_ms`.
    fn start(&mut self, period_ms: u32);
    /// Cancel the pending schedule, if any.
    fn cancel(&mut self);
    fn is_running(&self) -> bool;
}

/// Deterministic [`IntervalTimer`] driven by an explicit millisecond clock.
#[derive(Clone, Debug, Default)]
pub struct ManualInterval {
    now_ms: u64,
    period_ms: u32,
    next_due_ms: Option<u64>,
    starts: usize,
    cancels: usize,
}

impl ManualInterval {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Time of the next firing, if the timer is running.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.next_due_ms
    }

    pub fn starts(&self) -> usize {
        self.starts
    }

    pub fn cancels(&self) -> usize {
        self.cancels
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Pop the next firing at or before `until_ms`, moving the clock to it.
    pub fn take_due(&mut self, until_ms: u64) -> Option<u64> {
        let due = self.next_due_ms.filter(|due| *due <= until_ms)?;
        self.now_ms = due;
        self.next_due_ms = Some(due + u64::from(self.period_ms.max(1)));
        Some(due)
    }
}

impl IntervalTimer for ManualInterval {
    fn start(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
        self.next_due_ms = Some(self.now_ms + u64::from(period_ms.max(1)));
        self.starts += 1;
    }

    fn cancel(&mut self) {
        if self.next_due_ms.take().is_some() {
            self.cancels += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }
}

/// Trailing-edge debounce: an action settles once no event has been noted for
/// `delay_ms`.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay_ms: u32,
    last_event_ms: Option<f64>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            last_event_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.last_event_ms.is_some()
    }

    pub fn note(&mut self, now_ms: f64) {
        self.last_event_ms = Some(now_ms);
    }

    /// Returns true exactly once per burst, when `now_ms` is at least `delay_ms`
    /// past the last noted event.
    pub fn settle(&mut self, now_ms: f64) -> bool {
        match self.last_event_ms {
            Some(last) if now_ms - last >= f64::from(self.delay_ms) => {
                self.last_event_ms = None;
                true
            }
            _ => false,
        }
    }

    /// Settle the pending burst now. Used when a platform timer armed with
    /// `delay_ms` has already done the waiting.
    pub fn flush(&mut self) -> bool {
        self.last_event_ms.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_fires_once_per_burst() {
        let mut d = Debouncer::new(100);
        assert!(!d.flush());
        d.note(0.0);
        d.note(40.0);
        assert!(d.flush());
        assert!(!d.flush());
    }

    #[test]
    fn manual_interval_fires_on_period_multiples() {
        let mut t = ManualInterval::new();
        t.start(100);
        assert_eq!(t.take_due(250), Some(100));
        assert_eq!(t.take_due(250), Some(200));
        assert_eq!(t.take_due(250), None);
        assert_eq!(t.now_ms(), 200);
    }

    #[test]
    fn manual_interval_restart_rebases_on_current_time() {
        let mut t = ManualInterval::new();
        t.start(100);
        t.set_now(90);
        t.cancel();
        t.start(100);
        assert_eq!(t.next_due_ms(), Some(190));
        assert_eq!(t.starts(), 2);
        assert_eq!(t.cancels(), 1);
    }

    #[test]
    fn cancel_on_idle_timer_is_not_counted() {
        let mut t = ManualInterval::new();
        t.cancel();
        assert_eq!(t.cancels(), 0);
        assert!(!t.is_running());
    }

    #[test]
    fn debouncer_settles_only_after_quiet_period() {
        let mut d = Debouncer::new(100);
        d.note(0.0);
        d.note(50.0);
        d.note(90.0);
        assert!(!d.settle(150.0));
        assert!(d.settle(190.0));
        assert!(!d.settle(400.0), "settles once per burst");
    }
}
