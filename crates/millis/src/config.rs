//! Timebase clock configuration
//!
//! The compare threshold for a clock frequency `F` and prescaler divisor `D`
//! is `T = round(F / D / 1000) - 1`. The timer counts `0..=T`, so one
//! interrupt period lasts `(T + 1) * D / F` seconds.
//!
//! The reference configuration is a 16 MHz crystal with a divide-by-64
//! prescaler:
//!
//! | quantity        | value              |
//! |-----------------|--------------------|
//! | timer clock     | 16 MHz / 64 = 250 kHz |
//! | count period    | 4 us               |
//! | counts per tick | 250                |
//! | threshold       | 249                |
//! | tick period     | 1.000 ms (0 ppm)   |
//!
//! Other combinations only approximate 1 ms; [`TimebaseConfig::error_ppm`]
//! reports by how much.

use core::fmt;

/// Interrupt rate of the timebase, in hertz.
pub const TICK_HZ: u32 = 1_000;

const NANOS_PER_SEC: u64 = 1_000_000_000;
const PPM: i64 = 1_000_000;

/// Clock divider applied to the CPU clock before it reaches the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prescaler {
    Direct,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    /// Integer divisor applied to the input clock.
    pub const fn divisor(self) -> u32 {
        match self {
            Self::Direct => 1,
            Self::Div8 => 8,
            Self::Div64 => 64,
            Self::Div256 => 256,
            Self::Div1024 => 1024,
        }
    }

    /// Clock-select field value (`CS02:CS00`).
    pub const fn clock_select(self) -> u8 {
        match self {
            Self::Direct => 0b001,
            Self::Div8 => 0b010,
            Self::Div64 => 0b011,
            Self::Div256 => 0b100,
            Self::Div1024 => 0b101,
        }
    }
}

impl fmt::Display for Prescaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.divisor())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Prescaler {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "/{}", self.divisor());
    }
}

/// Errors produced while validating a [`TimebaseConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// CPU frequency of zero hertz
    ZeroFrequency,
    /// Divided clock is slower than the tick rate
    ClockTooSlow,
    /// Threshold does not fit the 8-bit compare register
    ThresholdOverflow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroFrequency => write!(f, "CPU frequency must be non-zero"),
            ConfigError::ClockTooSlow => write!(f, "Divided clock is slower than 1 kHz"),
            ConfigError::ThresholdOverflow => {
                write!(f, "Compare threshold does not fit in 8 bits")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConfigError::ZeroFrequency => defmt::write!(fmt, "ZeroFrequency"),
            ConfigError::ClockTooSlow => defmt::write!(fmt, "ClockTooSlow"),
            ConfigError::ThresholdOverflow => defmt::write!(fmt, "ThresholdOverflow"),
        }
    }
}

/// Validated clock configuration for the timebase driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimebaseConfig {
    cpu_hz: u32,
    prescaler: Prescaler,
    compare: u8,
}

impl TimebaseConfig {
    /// 16 MHz CPU clock, divide-by-64, threshold 249.
    pub const DEFAULT: Self = Self {
        cpu_hz: 16_000_000,
        prescaler: Prescaler::Div64,
        compare: 249,
    };

    /// Validate a clock/prescaler pair and derive its compare threshold.
    pub const fn new(cpu_hz: u32, prescaler: Prescaler) -> Result<Self, ConfigError> {
        match threshold(cpu_hz, prescaler.divisor()) {
            Ok(compare) => Ok(Self {
                cpu_hz,
                prescaler,
                compare,
            }),
            Err(err) => Err(err),
        }
    }

    /// Input clock frequency in hertz.
    pub const fn cpu_hz(&self) -> u32 {
        self.cpu_hz
    }

    pub const fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    /// Value written to the output compare register.
    pub const fn compare_value(&self) -> u8 {
        self.compare
    }

    /// Timer counting frequency after the prescaler.
    pub const fn timer_hz(&self) -> u32 {
        self.cpu_hz / self.prescaler.divisor()
    }

    /// Timer counts per interrupt (`compare_value + 1`).
    pub const fn counts_per_tick(&self) -> u32 {
        self.compare as u32 + 1
    }

    /// True interrupt period in nanoseconds, truncated.
    pub const fn period_ns(&self) -> u64 {
        self.cycles_per_tick() * NANOS_PER_SEC / self.cpu_hz as u64
    }

    /// Deviation of the true period from 1 ms, in parts per million.
    ///
    /// Positive values mean the counter runs slow (ticks are too long).
    pub const fn error_ppm(&self) -> i64 {
        let actual = self.cycles_per_tick() as i64 * TICK_HZ as i64;
        let ideal = self.cpu_hz as i64;
        (actual - ideal) * PPM / ideal
    }

    const fn cycles_per_tick(&self) -> u64 {
        self.counts_per_tick() as u64 * self.prescaler.divisor() as u64
    }
}

impl Default for TimebaseConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TimebaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Hz{} cmp={} ({}ppm)",
            self.cpu_hz,
            self.prescaler,
            self.compare,
            self.error_ppm()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimebaseConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{}Hz{} cmp={} ({}ppm)",
            self.cpu_hz,
            self.prescaler,
            self.compare,
            self.error_ppm()
        );
    }
}

/// `round(F / D / 1000) - 1`, rounding half up.
const fn threshold(cpu_hz: u32, divisor: u32) -> Result<u8, ConfigError> {
    if cpu_hz == 0 {
        return Err(ConfigError::ZeroFrequency);
    }

    let scale = divisor as u64 * TICK_HZ as u64;
    let counts = (cpu_hz as u64 + scale / 2) / scale;
    if counts == 0 {
        Err(ConfigError::ClockTooSlow)
    } else if counts - 1 > u8::MAX as u64 {
        Err(ConfigError::ThresholdOverflow)
    } else {
        Ok((counts - 1) as u8)
    }
}
