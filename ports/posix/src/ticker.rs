//! Compare-match source for the emulated timer
//!
//! A [`Ticker`] owns a background thread that plays the role of Timer0 and the
//! interrupt controller: once per programmed period it raises a compare match
//! on its [`HostTimer`], which dispatches the handler when the interrupt is
//! unmasked. Deadlines are absolute (`next += period`), so a late wake-up is
//! caught up on the next iterations instead of accumulating drift.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};
use thiserror::Error;

use crate::registers::HostTimer;

/// Interrupt handler invoked on every unmasked compare match.
pub type TickHandler = fn();

#[derive(Debug, Error)]
pub enum TickerError {
    #[error("ticker is already running")]
    AlreadyRunning,
    #[error("timer is not configured for CTC compare-match interrupts")]
    NotConfigured,
    #[error("failed to spawn ticker thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Thread-backed compare-match generator.
///
/// No compare match is raised once [`stop`](Ticker::stop) has been requested,
/// even if the thread was asleep at the time.
#[derive(Debug)]
pub struct Ticker {
    timer: HostTimer,
    cpu_hz: u32,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Attaches `handler` to `timer` as its compare-match vector.
    pub fn new(timer: HostTimer, cpu_hz: u32, handler: TickHandler) -> Self {
        timer.attach(handler);
        Self {
            timer,
            cpu_hz,
            running: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    /// Start generating compare matches.
    ///
    /// The period is read from the timer registers, so the driver must have
    /// programmed them first.
    pub fn start(&mut self) -> Result<(), TickerError> {
        if self.thread.is_some() {
            return Err(TickerError::AlreadyRunning);
        }
        let period = self
            .timer
            .period(self.cpu_hz)
            .ok_or(TickerError::NotConfigured)?;

        self.running.store(true, Ordering::SeqCst);
        let timer = self.timer.clone();
        let running = Arc::clone(&self.running);
        let spawned = thread::Builder::new()
            .name("millis-ticker".into())
            .spawn(move || ticker_thread(timer, period, running));

        match spawned {
            Ok(handle) => {
                self.thread = Some(handle);
                info!("ticker started, period {:?}", period);
                Ok(())
            }
            Err(err) => {
                self.running.store(false, Ordering::SeqCst);
                Err(err.into())
            }
        }
    }

    /// Stop the thread and wait for it to exit. No-op when not running.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
            info!("ticker stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    pub fn timer(&self) -> &HostTimer {
        &self.timer
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn ticker_thread(timer: HostTimer, period: Duration, running: Arc<AtomicBool>) {
    let mut next = Instant::now();
    let mut matches: u64 = 0;

    while running.load(Ordering::Relaxed) {
        next += period;

        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        }
        if !running.load(Ordering::Relaxed) {
            break;
        }

        timer.compare_match();
        matches += 1;
    }

    debug!("ticker thread exiting after {} compare matches", matches);
}
