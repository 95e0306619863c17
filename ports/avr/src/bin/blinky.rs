//! Arduino Uno blinky: toggles the on-board LED (PB5) every 500 ms without
//! blocking the main loop.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use panic_halt as _;

use millis_avr::millis::{self, IntervalTimer};

const LED: u8 = 1 << 5;
const BLINK_MS: u32 = 500;

millis_avr::bind_timer0_vector!();

#[avr_device::entry]
fn main() -> ! {
    let dp = match avr_device::atmega328p::Peripherals::take() {
        Some(dp) => dp,
        None => loop {},
    };

    dp.PORTB.ddrb().modify(|r, w| unsafe { w.bits(r.bits() | LED) });

    let _timebase = millis_avr::init(dp.TC0);
    // SAFETY: the timebase is configured and no other critical section is open.
    unsafe { avr_device::interrupt::enable() };

    let mut blink = IntervalTimer::new(millis::millis(), BLINK_MS);
    loop {
        if blink.poll(millis::millis()) {
            // Writing a one to PINx toggles the output.
            dp.PORTB.pinb().write(|w| unsafe { w.bits(LED) });
        }
    }
}
