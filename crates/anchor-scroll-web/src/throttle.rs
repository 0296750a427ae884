#![forbid(unsafe_code)]

//! Leading-edge throttle with a trailing call, driven by an external clock.
//!
//! The first call in a quiet period fires immediately. Calls arriving within
//! `interval` of the last firing are suppressed, but the last of them is kept
//! as pending and becomes due once the interval has elapsed, so the final
//! scroll position of a burst is always evaluated.
//!
//! Time is passed in by the caller (monotonic, since any fixed origin), which
//! keeps the throttle deterministic under test.

use web_time::Duration;

#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_fired: Option<Duration>,
    pending: bool,
}

impl Throttle {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fired: None,
            pending: false,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Record a call at `now`. Returns `true` when it should run immediately.
    pub fn call(&mut self, now: Duration) -> bool {
        if self.is_open(now) {
            self.fire(now);
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Whether a suppressed call is waiting.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending
    }

    /// Time left until the pending call may run, if one is waiting.
    #[must_use]
    pub fn pending_delay(&self, now: Duration) -> Option<Duration> {
        if !self.pending {
            return None;
        }
        let elapsed = self.last_fired.map_or(self.interval, |last| now.saturating_sub(last));
        Some(self.interval.saturating_sub(elapsed))
    }

    /// [`pending_delay`](Self::pending_delay) in whole milliseconds, rounded up.
    ///
    /// Timers scheduled with this value never fire before the pending call is
    /// due.
    #[must_use]
    pub fn pending_delay_millis(&self, now: Duration) -> Option<u32> {
        self.pending_delay(now).map(|delay| {
            u32::try_from(delay.as_micros().div_ceil(1000)).unwrap_or(u32::MAX)
        })
    }

    /// Take the pending call if it is due at `now`.
    pub fn flush_due(&mut self, now: Duration) -> bool {
        if self.pending && self.is_open(now) {
            self.fire(now);
            true
        } else {
            false
        }
    }

    fn is_open(&self, now: Duration) -> bool {
        self.last_fired
            .is_none_or(|last| now.saturating_sub(last) >= self.interval)
    }

    fn fire(&mut self, now: Duration) {
        self.last_fired = Some(now);
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn first_call_fires() {
        let mut throttle = Throttle::new(ms(100));
        assert!(throttle.call(ms(5)));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn burst_collapses_to_leading_and_trailing() {
        let mut throttle = Throttle::new(ms(100));
        let fired: Vec<bool> = [0, 10, 20, 30].iter().map(|&t| throttle.call(ms(t))).collect();
        assert_eq!(fired, vec![true, false, false, false]);
        assert!(throttle.has_pending());
        assert_eq!(throttle.pending_delay(ms(30)), Some(ms(70)));
        assert!(!throttle.flush_due(ms(99)));
        assert!(throttle.flush_due(ms(100)));
        assert!(!throttle.has_pending());
        assert!(!throttle.flush_due(ms(300)));
    }

    #[test]
    fn spaced_calls_all_fire() {
        let mut throttle = Throttle::new(ms(100));
        assert!(throttle.call(ms(0)));
        assert!(throttle.call(ms(100)));
        assert!(throttle.call(ms(250)));
    }

    #[test]
    fn zero_interval_never_suppresses() {
        let mut throttle = Throttle::new(Duration::ZERO);
        assert!(throttle.call(ms(1)));
        assert!(throttle.call(ms(1)));
    }

    #[test]
    fn clock_going_backwards_does_not_fire_early() {
        let mut throttle = Throttle::new(ms(100));
        assert!(throttle.call(ms(500)));
        assert!(!throttle.call(ms(400)));
        assert_eq!(throttle.pending_delay(ms(400)), Some(ms(100)));
    }

    #[test]
    fn timer_delay_rounds_up_to_due_time() {
        let mut throttle = Throttle::new(ms(100));
        assert!(throttle.call(Duration::from_micros(10_300)));
        assert!(!throttle.call(ms(50)));
        assert_eq!(throttle.pending_delay(ms(50)), Some(Duration::from_micros(60_300)));

        let millis = throttle.pending_delay_millis(ms(50)).unwrap();
        assert_eq!(millis, 61);
        assert!(throttle.flush_due(ms(50 + u64::from(millis))));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn early_timer_keeps_call_pending() {
        let mut throttle = Throttle::new(ms(100));
        assert!(throttle.call(Duration::from_micros(10_300)));
        assert!(!throttle.call(ms(50)));
        // A timer firing at 110ms is still 0.3ms short.
        assert!(!throttle.flush_due(ms(110)));
        assert!(throttle.has_pending());
        assert_eq!(throttle.pending_delay_millis(ms(110)), Some(1));
        assert!(throttle.flush_due(ms(111)));
    }

    #[test]
    fn no_delay_without_pending() {
        let throttle = Throttle::new(ms(100));
        assert_eq!(throttle.pending_delay(ms(0)), None);
        assert_eq!(throttle.pending_delay_millis(ms(0)), None);
    }
}
