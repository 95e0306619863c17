//! Host blinky: prints a toggling "LED" every 500 ms until Ctrl-C.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{error, info};
use millis::IntervalTimer;
use millis_posix::{PortConfig, PosixPort};

const BLINK_MS: u32 = 500;
const REPORT_MS: u32 = 5_000;

fn main() {
    env_logger::init();

    let quit = Arc::new(AtomicBool::new(false));
    {
        let quit = Arc::clone(&quit);
        if let Err(err) = ctrlc::set_handler(move || quit.store(true, Ordering::SeqCst)) {
            error!("failed to install Ctrl-C handler: {}", err);
            return;
        }
    }

    let mut port = match PosixPort::start(PortConfig::new()) {
        Ok(port) => port,
        Err(err) => {
            error!("failed to start timebase: {}", err);
            return;
        }
    };
    port.enable_interrupts();

    let mut blink = IntervalTimer::new(millis::millis(), BLINK_MS);
    let mut report = IntervalTimer::new(millis::millis(), REPORT_MS);
    let mut led = false;

    while !quit.load(Ordering::SeqCst) {
        let now = millis::millis();
        if blink.poll(now) {
            led = !led;
            println!("{:>8} ms  LED {}", now, if led { "on" } else { "off" });
        }
        if report.poll(now) {
            info!("uptime {} ms", now);
        }
        std::thread::yield_now();
    }

    port.stop();
    info!("stopped at {} ms", millis::millis());
}
