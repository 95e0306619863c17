//! System tick counter
//!
//! [`SYSTEM_MILLIS`] counts compare-match interrupts since the timebase was
//! started. It has exactly one writer, the interrupt handler, and any number
//! of readers in the main context. It is never reset and wraps from
//! `u32::MAX` to `0` after about 49.7 days; consumers compute elapsed time
//! with `wrapping_sub` (see [`IntervalTimer`](crate::IntervalTimer)).
//!
//! # Read discipline
//!
//! A 32-bit read is not a single instruction on every target:
//!
//! - Targets with native 32-bit atomics (Cortex-M3 and up, RISC-V `a`,
//!   hosts) store the count in an `AtomicU32`. Reads are plain loads, and the
//!   single writer does a load followed by a store, so no read-modify-write
//!   instruction is needed.
//! - Everything else (AVR, Cortex-M0) keeps the count behind a
//!   [`critical_section::Mutex`]. Reads mask interrupts for the four byte
//!   loads so the handler cannot tear them. The handler itself already runs
//!   with interrupts masked, so its critical section costs nothing extra.
//!
//! [`TickCounter`] names whichever of [`AtomicTicks`] and [`MaskedTicks`] the
//! target needs. The `masked-counter` feature forces [`MaskedTicks`] on every
//! target, so hosts can run the AVR read path.
//!
//! Either way a value returned by [`TickCounter::now`] was the true count at
//! some instant between the call and one tick period later.

use core::cell::Cell;
use core::fmt;
#[cfg(target_has_atomic = "32")]
use core::sync::atomic::{AtomicU32, Ordering};

/// Counter read and written with interrupts masked.
pub struct MaskedTicks {
    ticks: critical_section::Mutex<Cell<u32>>,
}

impl MaskedTicks {
    /// Counter starting at zero.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Counter starting at an arbitrary value.
    pub const fn starting_at(ticks: u32) -> Self {
        Self {
            ticks: critical_section::Mutex::new(Cell::new(ticks)),
        }
    }

    /// Current tick count.
    #[inline]
    pub fn now(&self) -> u32 {
        critical_section::with(|cs| self.ticks.borrow(cs).get())
    }

    /// Advance by exactly one tick, wrapping at `u32::MAX`.
    ///
    /// Only the interrupt handler may call this.
    #[inline]
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let cell = self.ticks.borrow(cs);
            cell.set(cell.get().wrapping_add(1));
        })
    }
}

impl Default for MaskedTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MaskedTicks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MaskedTicks").field(&self.now()).finish()
    }
}

/// Counter backed by a native 32-bit atomic.
#[cfg(target_has_atomic = "32")]
pub struct AtomicTicks {
    ticks: AtomicU32,
}

#[cfg(target_has_atomic = "32")]
impl AtomicTicks {
    /// Counter starting at zero.
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Counter starting at an arbitrary value.
    pub const fn starting_at(ticks: u32) -> Self {
        Self {
            ticks: AtomicU32::new(ticks),
        }
    }

    /// Current tick count.
    #[inline]
    pub fn now(&self) -> u32 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Advance by exactly one tick, wrapping at `u32::MAX`.
    ///
    /// Only the interrupt handler may call this; the load/store pair is not
    /// safe against a second writer.
    #[inline]
    pub fn tick(&self) {
        let next = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
        self.ticks.store(next, Ordering::Release);
    }
}

#[cfg(target_has_atomic = "32")]
impl Default for AtomicTicks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_has_atomic = "32")]
impl fmt::Debug for AtomicTicks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicTicks").field(&self.now()).finish()
    }
}

/// Millisecond counter shared between an interrupt handler and the main loop.
#[cfg(all(target_has_atomic = "32", not(feature = "masked-counter")))]
pub type TickCounter = AtomicTicks;

/// Millisecond counter shared between an interrupt handler and the main loop.
#[cfg(any(not(target_has_atomic = "32"), feature = "masked-counter"))]
pub type TickCounter = MaskedTicks;

/// Milliseconds since the timebase started, written by the compare-match
/// interrupt.
pub static SYSTEM_MILLIS: TickCounter = TickCounter::new();

/// Read [`SYSTEM_MILLIS`].
#[inline]
pub fn millis() -> u32 {
    SYSTEM_MILLIS.now()
}

/// Body of the Timer0 compare-match A interrupt handler.
///
/// Ports call this, and nothing else, from the vector they register.
#[inline]
pub fn on_compare_match() {
    SYSTEM_MILLIS.tick();
}
