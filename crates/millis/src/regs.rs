//! Register-access collaborator
//!
//! The driver never touches memory-mapped registers directly. Ports implement
//! [`TimerRegisters`] on top of their peripheral access crate (or an in-memory
//! register file on the host), and the driver expresses its configuration as
//! single-bit operations on the registers named here.

/// Timer/Counter0 registers used by the timebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Control register A (waveform generation, low bits)
    Tccr0a,
    /// Control register B (clock select, waveform generation high bit)
    Tccr0b,
    /// Interrupt mask register
    Timsk0,
    /// Interrupt flag register (write one to clear)
    Tifr0,
}

impl Register {
    pub const ALL: [Register; 4] = [Self::Tccr0a, Self::Tccr0b, Self::Timsk0, Self::Tifr0];

    /// Position of this register in a dense register file.
    pub const fn index(self) -> usize {
        match self {
            Self::Tccr0a => 0,
            Self::Tccr0b => 1,
            Self::Timsk0 => 2,
            Self::Tifr0 => 3,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Register {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Tccr0a => defmt::write!(fmt, "TCCR0A"),
            Self::Tccr0b => defmt::write!(fmt, "TCCR0B"),
            Self::Timsk0 => defmt::write!(fmt, "TIMSK0"),
            Self::Tifr0 => defmt::write!(fmt, "TIFR0"),
        }
    }
}

// TCCR0A
pub const WGM00: u8 = 0;
pub const WGM01: u8 = 1;

// TCCR0B
pub const CS00: u8 = 0;
pub const CS01: u8 = 1;
pub const CS02: u8 = 2;
pub const WGM02: u8 = 3;

// TIMSK0
pub const OCIE0A: u8 = 1;

// TIFR0
pub const OCF0A: u8 = 1;

/// Bit-level access to the timer registers.
///
/// Implementations must make each call a complete read-modify-write on the
/// hardware register; the driver only calls these before global interrupts are
/// enabled, so no further atomicity is required.
pub trait TimerRegisters {
    /// Set a single bit
    fn set_bit(&mut self, reg: Register, bit: u8);

    /// Clear a single bit
    fn clear_bit(&mut self, reg: Register, bit: u8);

    /// Test a single bit
    fn is_set(&self, reg: Register, bit: u8) -> bool;

    /// Clear a pending interrupt flag.
    ///
    /// Flag registers are write-one-to-clear, so this is not `clear_bit`.
    fn clear_flag(&mut self, reg: Register, bit: u8);

    /// Write the output compare register (`OCR0A`)
    fn write_compare(&mut self, value: u8);
}

impl<T: TimerRegisters + ?Sized> TimerRegisters for &mut T {
    fn set_bit(&mut self, reg: Register, bit: u8) {
        (**self).set_bit(reg, bit)
    }

    fn clear_bit(&mut self, reg: Register, bit: u8) {
        (**self).clear_bit(reg, bit)
    }

    fn is_set(&self, reg: Register, bit: u8) -> bool {
        (**self).is_set(reg, bit)
    }

    fn clear_flag(&mut self, reg: Register, bit: u8) {
        (**self).clear_flag(reg, bit)
    }

    fn write_compare(&mut self, value: u8) {
        (**self).write_compare(value)
    }
}
