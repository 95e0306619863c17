#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # millis
//!
//! A free-running millisecond time base for small microcontrollers.
//!
//! An 8-bit hardware timer is put into Clear-Timer-on-Compare mode so that it
//! raises a compare-match interrupt once per millisecond. The interrupt
//! handler advances [`SYSTEM_MILLIS`], and client code polls that counter
//! through [`IntervalTimer`] to schedule periodic work without blocking the
//! main loop.
//!
//! ## Module Overview
//! - [`config`]   – clock/prescaler configuration and the compare threshold.
//! - [`regs`]     – register-access collaborator implemented by ports.
//! - [`driver`]   – the Timer0 timebase driver.
//! - [`counter`]  – the tick counter shared with the interrupt handler.
//! - [`interval`] – non-blocking interval timers.
//! - [`delay`]    – blocking `DelayNs` adapter built on the counter.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut timebase = millis::Timebase::new(port_registers);
//! timebase.initialize();
//! unsafe { enable_global_interrupts() };
//!
//! let mut led = millis::IntervalTimer::new(millis::millis(), 500);
//! loop {
//!     if led.poll(millis::millis()) {
//!         toggle_led();
//!     }
//! }
//! ```

#[cfg(all(test, not(feature = "std")))]
extern crate std;

pub mod config;
pub mod counter;
pub mod delay;
pub mod driver;
pub mod interval;
pub mod regs;

pub use config::{ConfigError, Prescaler, TimebaseConfig, TICK_HZ};
#[cfg(target_has_atomic = "32")]
pub use counter::AtomicTicks;
pub use counter::{millis, on_compare_match, MaskedTicks, TickCounter, SYSTEM_MILLIS};
pub use delay::{Clock, MillisDelay};
pub use driver::{Timebase, TimebaseState};
pub use interval::IntervalTimer;
pub use regs::{Register, TimerRegisters};

#[cfg(test)]
mod tests;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
