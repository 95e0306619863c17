//! Non-blocking interval timers
//!
//! An [`IntervalTimer`] holds a snapshot of the tick counter, not a reference
//! to it. Every computation takes the current count as `now`, so the same
//! timer works against [`millis`](crate::millis), a test clock, or any other
//! wrapping `u32` time source.
//!
//! Elapsed time is always `now.wrapping_sub(previous)`, which stays correct
//! across the counter's wraparound as long as less than `2^32` ticks pass
//! between checks.

use core::fmt;

/// Reference timestamp plus the period between periodic actions.
///
/// Fields are public; any initial values are valid. An `interval` of zero
/// makes [`expired`](Self::expired) return `true` every time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalTimer {
    /// Tick count at which the current period started.
    pub previous: u32,
    /// Elapsed ticks cached by the last [`elapsed`](Self::elapsed) call.
    pub delta: u32,
    /// Period length in ticks.
    pub interval: u32,
}

impl IntervalTimer {
    /// Timer whose first period starts at `now`.
    pub const fn new(now: u32, interval: u32) -> Self {
        Self {
            previous: now,
            delta: 0,
            interval,
        }
    }

    /// Ticks since `previous`, also stored in `delta`.
    pub fn elapsed(&mut self, now: u32) -> u32 {
        self.delta = now.wrapping_sub(self.previous);
        self.delta
    }

    /// `true` once at least `interval` ticks have passed since `previous`.
    ///
    /// Does not advance the timer; asking twice gives the same answer.
    pub fn expired(&self, now: u32) -> bool {
        now.wrapping_sub(self.previous) >= self.interval
    }

    /// Start the next period at `now`.
    pub fn advance(&mut self, now: u32) {
        self.previous = now;
    }

    /// Check and restart in one step.
    ///
    /// Returns `true` and advances to `now` when the interval has expired.
    /// Periods are measured from the moment the expiry was noticed, so a late
    /// poll delays every following period rather than bunching them up.
    pub fn poll(&mut self, now: u32) -> bool {
        if self.expired(now) {
            self.advance(now);
            true
        } else {
            false
        }
    }

    /// Ticks left in the current period, zero once expired.
    pub fn remaining(&self, now: u32) -> u32 {
        self.interval.saturating_sub(now.wrapping_sub(self.previous))
    }
}

impl fmt::Display for IntervalTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}ms", self.previous, self.interval)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IntervalTimer {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}+{}ms", self.previous, self.interval);
    }
}
