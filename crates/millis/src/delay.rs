//! Blocking delays on top of the tick counter
//!
//! [`MillisDelay`] implements [`embedded_hal::delay::DelayNs`] by busy-polling
//! an [`IntervalTimer`]. Resolution is one tick, and every request is rounded
//! up so the delay is never shorter than asked for. Interrupts must be running,
//! otherwise the delay never ends.

use embedded_hal::delay::DelayNs;

use crate::counter;
use crate::interval::IntervalTimer;

const NANOS_PER_MILLI: u32 = 1_000_000;
const MICROS_PER_MILLI: u32 = 1_000;

/// Source of the current tick count.
pub trait Clock {
    fn now(&self) -> u32;
}

impl<F: Fn() -> u32> Clock for F {
    fn now(&self) -> u32 {
        self()
    }
}

/// Busy-wait delay driven by a millisecond [`Clock`].
#[derive(Debug, Clone, Copy)]
pub struct MillisDelay<C> {
    clock: C,
}

impl MillisDelay<fn() -> u32> {
    /// Delay driven by [`SYSTEM_MILLIS`](crate::SYSTEM_MILLIS).
    pub fn system() -> Self {
        Self::new(counter::millis as fn() -> u32)
    }
}

impl<C: Clock> MillisDelay<C> {
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    fn wait_ticks(&mut self, ticks: u32) {
        if ticks == 0 {
            return;
        }
        // The current tick is already partly over; waiting for one extra
        // boundary guarantees `ticks` whole periods.
        let timer = IntervalTimer::new(self.clock.now(), ticks.saturating_add(1));
        while !timer.expired(self.clock.now()) {
            core::hint::spin_loop();
        }
    }
}

impl<C: Clock> DelayNs for MillisDelay<C> {
    fn delay_ns(&mut self, ns: u32) {
        self.wait_ticks(ns.div_ceil(NANOS_PER_MILLI));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait_ticks(us.div_ceil(MICROS_PER_MILLI));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait_ticks(ms);
    }
}
