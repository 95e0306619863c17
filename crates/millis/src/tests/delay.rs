use core::cell::Cell;

use embedded_hal::delay::DelayNs;

use crate::delay::MillisDelay;

/// Clock that advances one tick every time it is read.
fn stepping(ticks: &Cell<u32>) -> impl Fn() -> u32 + '_ {
    move || {
        let now = ticks.get();
        ticks.set(now.wrapping_add(1));
        now
    }
}

#[test]
fn waits_one_extra_boundary() {
    let ticks = Cell::new(0);
    let mut delay = MillisDelay::new(stepping(&ticks));
    delay.delay_ms(5);
    // start read at 0, then reads 1..=6
    assert_eq!(ticks.get(), 7);
}

#[test]
fn zero_delay_does_not_read_clock() {
    let ticks = Cell::new(0);
    let mut delay = MillisDelay::new(stepping(&ticks));
    delay.delay_ms(0);
    delay.delay_us(0);
    assert_eq!(ticks.get(), 0);
}

#[test]
fn sub_millisecond_rounds_up() {
    let ticks = Cell::new(0);
    let mut delay = MillisDelay::new(stepping(&ticks));
    delay.delay_ns(1);
    assert_eq!(ticks.get(), 3);

    let ticks = Cell::new(0);
    let mut delay = MillisDelay::new(stepping(&ticks));
    delay.delay_us(1_500);
    assert_eq!(ticks.get(), 4);
}

#[test]
fn works_across_wraparound() {
    let ticks = Cell::new(u32::MAX - 1);
    let mut delay = MillisDelay::new(stepping(&ticks));
    delay.delay_ms(3);
    assert_eq!(ticks.get(), 3);
}

#[test]
fn system_delay_follows_compare_matches() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use crate::counter::{millis, on_compare_match};

    let _guard = super::lock_system_millis();

    let stop = Arc::new(AtomicBool::new(false));
    let isr = {
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            while !stop.load(Ordering::Acquire) {
                on_compare_match();
                thread::sleep(Duration::from_micros(100));
            }
        })
    };

    let start = millis();
    MillisDelay::system().delay_ms(5);
    let waited = millis().wrapping_sub(start);

    stop.store(true, Ordering::Release);
    isr.join().unwrap();

    assert!(waited >= 6, "returned after {} ticks", waited);
}
