//! POSIX port of the `millis` timebase.
//!
//! Runs the unmodified driver against an emulated Timer0 ([`HostTimer`]) and
//! replaces the hardware compare-match interrupt with a thread ([`Ticker`]).
//! This lets applications and tests built on [`millis::IntervalTimer`] run on
//! a workstation with real wall-clock timing.
//!
//! ```no_run
//! use millis_posix::{PortConfig, PosixPort};
//!
//! let port = PosixPort::start(PortConfig::new()).unwrap();
//! port.enable_interrupts();
//!
//! let mut timer = millis::IntervalTimer::new(millis::millis(), 500);
//! loop {
//!     if timer.poll(millis::millis()) {
//!         println!("tick at {} ms", millis::millis());
//!     }
//! }
//! ```

pub mod registers;
pub mod ticker;

use log::info;
use millis::{Timebase, TimebaseConfig, TimebaseState};

pub use registers::HostTimer;
pub use ticker::{TickHandler, Ticker, TickerError};

/// Runtime configuration of the host port.
#[derive(Debug, Clone, Copy)]
pub struct PortConfig {
    /// Clock assumptions handed to the driver and the emulated timer.
    pub timebase: TimebaseConfig,
    /// Compare-match handler, normally [`millis::on_compare_match`].
    pub handler: TickHandler,
}

impl PortConfig {
    pub const fn new() -> Self {
        Self {
            timebase: TimebaseConfig::DEFAULT,
            handler: millis::on_compare_match,
        }
    }

    pub const fn with_handler(mut self, handler: TickHandler) -> Self {
        self.handler = handler;
        self
    }

    pub const fn with_timebase(mut self, timebase: TimebaseConfig) -> Self {
        self.timebase = timebase;
        self
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Driver, emulated registers and ticker wired together.
#[derive(Debug)]
pub struct PosixPort {
    timebase: Timebase<HostTimer>,
    ticker: Ticker,
}

impl PosixPort {
    /// Initialize the timebase and start the ticker.
    ///
    /// Interrupts stay disabled; compare matches only latch `OCF0A` until
    /// [`enable_interrupts`](Self::enable_interrupts) is called.
    pub fn start(config: PortConfig) -> Result<Self, TickerError> {
        let timer = HostTimer::new();
        let mut timebase = Timebase::with_config(timer.clone(), config.timebase);
        timebase.initialize();
        info!("timebase configured: {}", config.timebase);

        let mut ticker = Ticker::new(timer, config.timebase.cpu_hz(), config.handler);
        ticker.start()?;

        Ok(Self { timebase, ticker })
    }

    pub fn enable_interrupts(&self) {
        self.timer().enable_interrupts();
    }

    pub fn disable_interrupts(&self) {
        self.timer().disable_interrupts();
    }

    pub fn state(&self) -> TimebaseState {
        self.timebase.state()
    }

    pub fn timer(&self) -> &HostTimer {
        self.timebase.registers()
    }

    /// Stop the ticker. The counter keeps its value.
    pub fn stop(&mut self) {
        self.ticker.stop();
    }
}
