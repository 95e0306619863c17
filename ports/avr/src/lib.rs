//! ATmega328P port of the `millis` timebase.
//!
//! Binds [`millis::TimerRegisters`] to the `TC0` peripheral and provides the
//! `TIMER0_COMPA` vector that advances [`millis::SYSTEM_MILLIS`].
//!
//! AVR has no 32-bit atomics, so every [`millis::millis`] call runs inside a
//! `critical-section` (`cli` / restore `SREG`). The implementation comes from
//! `avr-device`'s `critical-section-impl` feature.
//!
//! ```rust,ignore
//! #![no_std]
//! #![no_main]
//! #![feature(abi_avr_interrupt)]
//!
//! millis_avr::bind_timer0_vector!();
//!
//! #[avr_device::entry]
//! fn main() -> ! {
//!     let dp = avr_device::atmega328p::Peripherals::take().unwrap();
//!     let _timebase = millis_avr::init(dp.TC0);
//!     unsafe { avr_device::interrupt::enable() };
//!     // ...
//! }
//! ```

#![no_std]

use avr_device::atmega328p::TC0;
use millis::{Register, Timebase, TimerRegisters};

pub use millis;

/// Timer/Counter0 behind the register-access trait.
pub struct Tc0Registers {
    tc0: TC0,
}

impl Tc0Registers {
    pub fn new(tc0: TC0) -> Self {
        Self { tc0 }
    }

    /// Give the peripheral back.
    pub fn free(self) -> TC0 {
        self.tc0
    }
}

/// Read-modify-write of one TC0 control register.
macro_rules! rmw {
    ($tc0:expr, $reg:expr, |$bits:ident| $update:expr) => {
        match $reg {
            Register::Tccr0a => {
                $tc0.tccr0a().modify(|r, w| {
                    let $bits = r.bits();
                    unsafe { w.bits($update) }
                });
            }
            Register::Tccr0b => {
                $tc0.tccr0b().modify(|r, w| {
                    let $bits = r.bits();
                    unsafe { w.bits($update) }
                });
            }
            Register::Timsk0 => {
                $tc0.timsk0().modify(|r, w| {
                    let $bits = r.bits();
                    unsafe { w.bits($update) }
                });
            }
            Register::Tifr0 => {
                $tc0.tifr0().modify(|r, w| {
                    let $bits = r.bits();
                    unsafe { w.bits($update) }
                });
            }
        }
    };
}

impl TimerRegisters for Tc0Registers {
    fn set_bit(&mut self, reg: Register, bit: u8) {
        rmw!(self.tc0, reg, |bits| bits | (1 << bit));
    }

    fn clear_bit(&mut self, reg: Register, bit: u8) {
        rmw!(self.tc0, reg, |bits| bits & !(1 << bit));
    }

    fn is_set(&self, reg: Register, bit: u8) -> bool {
        let bits = match reg {
            Register::Tccr0a => self.tc0.tccr0a().read().bits(),
            Register::Tccr0b => self.tc0.tccr0b().read().bits(),
            Register::Timsk0 => self.tc0.timsk0().read().bits(),
            Register::Tifr0 => self.tc0.tifr0().read().bits(),
        };
        bits & (1 << bit) != 0
    }

    fn clear_flag(&mut self, reg: Register, bit: u8) {
        // Writing ones to the other flags would clear them too.
        match reg {
            Register::Tifr0 => {
                self.tc0.tifr0().write(|w| unsafe { w.bits(1 << bit) });
            }
            _ => self.clear_bit(reg, bit),
        }
    }

    fn write_compare(&mut self, value: u8) {
        self.tc0.ocr0a().write(|w| unsafe { w.bits(value) });
    }
}

/// Configure `TC0` for the 16 MHz / 64 timebase.
///
/// Global interrupts are left as they are; enable them afterwards.
pub fn init(tc0: TC0) -> Timebase<Tc0Registers> {
    let mut timebase = Timebase::new(Tc0Registers::new(tc0));
    timebase.initialize();
    timebase
}

/// Define the `TIMER0_COMPA` vector in the calling crate.
///
/// The vector has to live in the final binary, so it is expanded there. The
/// caller needs `#![feature(abi_avr_interrupt)]` and an `avr-device`
/// dependency.
#[macro_export]
macro_rules! bind_timer0_vector {
    () => {
        #[avr_device::interrupt(atmega328p)]
        fn TIMER0_COMPA() {
            $crate::millis::on_compare_match();
        }
    };
}
