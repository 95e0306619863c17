//! Timer0 timebase driver
//!
//! Configures Timer/Counter0 for Clear-Timer-on-Compare (CTC) mode so that
//! the compare-match A interrupt fires once per millisecond. The interrupt
//! vector itself is registered by the port, which calls
//! [`on_compare_match`](crate::on_compare_match) from it.
//!
//! # Preconditions
//!
//! - [`Timebase::initialize`] is called exactly once, before anything relies
//!   on [`millis`](crate::millis).
//! - Timer0 is not used for anything else (PWM on OC0A/OC0B included).
//! - The caller enables global interrupts *after* `initialize` returns. The
//!   counter does not advance until it does.
//!
//! Violating these is undefined from the timebase's point of view; nothing is
//! detected at runtime apart from a `debug_assert!` on double initialization.

use crate::config::TimebaseConfig;
use crate::regs::{
    Register, TimerRegisters, CS00, CS01, CS02, OCF0A, OCIE0A, WGM00, WGM01, WGM02,
};

/// Lifecycle of the timebase as far as the driver can observe it.
///
/// `Configured` becomes "running" once the caller enables global interrupts;
/// there is no way back to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimebaseState {
    Uninitialized,
    Configured,
}

/// Driver for the hardware timer behind [`SYSTEM_MILLIS`](crate::SYSTEM_MILLIS).
#[derive(Debug)]
pub struct Timebase<R> {
    regs: R,
    config: TimebaseConfig,
    state: TimebaseState,
}

impl<R: TimerRegisters> Timebase<R> {
    /// Driver using [`TimebaseConfig::DEFAULT`].
    pub const fn new(regs: R) -> Self {
        Self::with_config(regs, TimebaseConfig::DEFAULT)
    }

    pub const fn with_config(regs: R, config: TimebaseConfig) -> Self {
        Self {
            regs,
            config,
            state: TimebaseState::Uninitialized,
        }
    }

    /// Program the timer for a 1 ms compare-match interrupt.
    ///
    /// Does not enable interrupts globally.
    pub fn initialize(&mut self) {
        debug_assert!(
            self.state == TimebaseState::Uninitialized,
            "timebase initialized twice"
        );

        // CTC: WGM02:WGM00 = 010
        self.regs.clear_bit(Register::Tccr0a, WGM00);
        self.regs.set_bit(Register::Tccr0a, WGM01);
        self.regs.clear_bit(Register::Tccr0b, WGM02);

        let cs = self.config.prescaler().clock_select();
        for (i, bit) in [CS00, CS01, CS02].into_iter().enumerate() {
            if cs & (1 << i) != 0 {
                self.regs.set_bit(Register::Tccr0b, bit);
            } else {
                self.regs.clear_bit(Register::Tccr0b, bit);
            }
        }

        self.regs.set_bit(Register::Timsk0, OCIE0A);
        self.regs.clear_flag(Register::Tifr0, OCF0A);
        self.regs.write_compare(self.config.compare_value());

        self.state = TimebaseState::Configured;
    }

    pub fn state(&self) -> TimebaseState {
        self.state
    }

    pub fn config(&self) -> &TimebaseConfig {
        &self.config
    }

    /// Borrow the underlying registers.
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Give the registers back. The hardware keeps running.
    pub fn release(self) -> R {
        self.regs
    }
}
