//! Emulated Timer/Counter0
//!
//! [`HostTimer`] is an in-memory copy of the four Timer0 control registers,
//! `OCR0A` and the status register's global interrupt bit. Clones share the
//! same state, so the driver can program one handle while the ticker thread
//! reads another, the way firmware and the timer peripheral share the real
//! registers.
//!
//! The handler attached with [`HostTimer::attach`] stands in for the
//! `TIMER0_COMPA` vector. Dispatch is serialized, so the handler never runs
//! on two threads at once, the same way an AVR interrupt cannot nest.

use std::sync::Arc;
use std::time::Duration;

use millis::regs::{CS00, CS01, CS02, OCF0A, OCIE0A, WGM00, WGM01, WGM02};
use millis::{Register, TimerRegisters};
use parking_lot::Mutex;

const NANOS_PER_SEC: u64 = 1_000_000_000;

#[derive(Debug, Default)]
struct RegisterFile {
    regs: [u8; 4],
    ocr0a: u8,
    /// SREG I-bit
    global_enable: bool,
}

impl RegisterFile {
    fn bit(&self, reg: Register, bit: u8) -> bool {
        self.regs[reg.index()] & (1 << bit) != 0
    }

    /// Clear and report `OCF0A` when it is latched and deliverable.
    fn take_pending(&mut self) -> bool {
        let deliverable = self.global_enable
            && self.bit(Register::Timsk0, OCIE0A)
            && self.bit(Register::Tifr0, OCF0A);
        if deliverable {
            // Entering the vector clears the flag in hardware.
            self.regs[Register::Tifr0.index()] &= !(1 << OCF0A);
        }
        deliverable
    }
}

/// Shared handle to the emulated timer registers.
#[derive(Debug, Clone, Default)]
pub struct HostTimer {
    inner: Arc<Mutex<RegisterFile>>,
    vector: Arc<Mutex<Option<fn()>>>,
}

impl HostTimer {
    /// Timer with every register at its reset value and interrupts disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a control register.
    pub fn read(&self, reg: Register) -> u8 {
        self.inner.lock().regs[reg.index()]
    }

    /// Current `OCR0A` value.
    pub fn compare(&self) -> u8 {
        self.inner.lock().ocr0a
    }

    /// Install the compare-match A handler.
    pub fn attach(&self, handler: fn()) {
        *self.vector.lock() = Some(handler);
    }

    /// Set the global interrupt enable bit (`sei`).
    ///
    /// A compare match latched while interrupts were off is delivered
    /// immediately, as on hardware.
    pub fn enable_interrupts(&self) {
        let pending = {
            let mut file = self.inner.lock();
            file.global_enable = true;
            file.take_pending()
        };
        if pending {
            self.dispatch();
        }
    }

    /// Clear the global interrupt enable bit (`cli`).
    pub fn disable_interrupts(&self) {
        self.inner.lock().global_enable = false;
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.inner.lock().global_enable
    }

    /// `true` when the waveform generator is in CTC mode (`WGM0 = 010`).
    pub fn is_ctc(&self) -> bool {
        let file = self.inner.lock();
        !file.bit(Register::Tccr0a, WGM00)
            && file.bit(Register::Tccr0a, WGM01)
            && !file.bit(Register::Tccr0b, WGM02)
    }

    /// Prescaler divisor selected by `CS02:CS00`, `None` when stopped or
    /// clocked externally.
    pub fn divisor(&self) -> Option<u32> {
        let file = self.inner.lock();
        let cs = [CS00, CS01, CS02]
            .into_iter()
            .enumerate()
            .filter(|&(_, bit)| file.bit(Register::Tccr0b, bit))
            .fold(0u8, |acc, (i, _)| acc | (1 << i));
        match cs {
            0b001 => Some(1),
            0b010 => Some(8),
            0b011 => Some(64),
            0b100 => Some(256),
            0b101 => Some(1024),
            _ => None,
        }
    }

    /// Compare-match period for a CPU clock of `cpu_hz`, as programmed.
    ///
    /// `None` unless the timer is in CTC mode with an internal clock source.
    pub fn period(&self, cpu_hz: u32) -> Option<Duration> {
        if cpu_hz == 0 || !self.is_ctc() {
            return None;
        }
        let divisor = self.divisor()?;
        let counts = u64::from(self.compare()) + 1;
        let nanos = counts * u64::from(divisor) * NANOS_PER_SEC / u64::from(cpu_hz);
        Some(Duration::from_nanos(nanos))
    }

    /// One compare match: latch `OCF0A`, then run the attached handler if
    /// the interrupt is unmasked.
    ///
    /// Returns `true` when the flag was delivered. The handler runs without
    /// the register lock held.
    pub fn compare_match(&self) -> bool {
        let pending = {
            let mut file = self.inner.lock();
            file.regs[Register::Tifr0.index()] |= 1 << OCF0A;
            file.take_pending()
        };
        if pending {
            self.dispatch();
        }
        pending
    }

    fn dispatch(&self) {
        let vector = self.vector.lock();
        if let Some(handler) = *vector {
            handler();
        }
    }
}

impl TimerRegisters for HostTimer {
    fn set_bit(&mut self, reg: Register, bit: u8) {
        self.inner.lock().regs[reg.index()] |= 1 << bit;
    }

    fn clear_bit(&mut self, reg: Register, bit: u8) {
        self.inner.lock().regs[reg.index()] &= !(1 << bit);
    }

    fn is_set(&self, reg: Register, bit: u8) -> bool {
        self.inner.lock().bit(reg, bit)
    }

    fn clear_flag(&mut self, reg: Register, bit: u8) {
        self.inner.lock().regs[reg.index()] &= !(1 << bit);
    }

    fn write_compare(&mut self, value: u8) {
        self.inner.lock().ocr0a = value;
    }
}
