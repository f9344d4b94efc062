//! ---
//! wusim_section: "01-core-functionality"
//! wusim_subsection: "module"
//! wusim_type: "source"
//! wusim_scope: "code"
//! wusim_description: "Wall-clock and delay abstraction."
//! wusim_version: "v0.1.0"
//! wusim_owner: "tbd"
//! ---
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveTime};
use parking_lot::Mutex;

/// Source of wall-clock time and blocking delays.
pub trait Clock {
    /// Local time of day, used for status-line timestamps.
    fn now(&self) -> NaiveTime;

    /// Block the calling thread.
    fn sleep(&self, duration: Duration);
}

/// The real clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A controllable clock that records requested delays instead of blocking.
///
/// Frozen by default; [`ManualClock::ticking`] advances the time on every
/// read. Clones share both the time and the recorded delays.
#[derive(Debug, Clone)]
pub struct ManualClock {
    time: Arc<Mutex<NaiveTime>>,
    tick: chrono::Duration,
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new(time: NaiveTime) -> Self {
        Self::ticking(time, chrono::Duration::zero())
    }

    /// Each call to [`Clock::now`] returns the current time, then advances it
    /// by `tick`.
    pub fn ticking(start: NaiveTime, tick: chrono::Duration) -> Self {
        Self {
            time: Arc::new(Mutex::new(start)),
            tick,
            slept: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Delays requested so far, in order.
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveTime {
        let mut time = self.time.lock();
        let current = *time;
        *time = current + self.tick;
        current
    }

    fn sleep(&self, duration: Duration) {
        self.slept.lock().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_records_without_blocking() {
        let time = NaiveTime::from_hms_opt(12, 34, 56).unwrap();
        let clock = ManualClock::new(time);
        let observer = clock.clone();
        clock.sleep(Duration::from_secs(3600));
        assert_eq!(observer.slept(), vec![Duration::from_secs(3600)]);
        assert_eq!(clock.now().format("%H:%M:%S").to_string(), "12:34:56");
        assert_eq!(clock.now(), time);
    }

    #[test]
    fn ticking_clock_advances_per_read() {
        let start = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        let clock = ManualClock::ticking(start, chrono::Duration::seconds(1));
        let observer = clock.clone();
        assert_eq!(clock.now(), start);
        assert_eq!(observer.now(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(clock.now(), NaiveTime::from_hms_opt(0, 0, 1).unwrap());
    }
}
