use crate::interval::IntervalTimer;

#[test]
fn expires_exactly_at_interval() {
    let mut timer = IntervalTimer::new(0, 1000);
    assert!(!timer.expired(999));
    assert!(timer.expired(1000));

    timer.advance(1000);
    assert_eq!(timer.previous, 1000);
    assert!(!timer.expired(1000));
}

#[test]
fn elapsed_survives_wraparound() {
    let mut timer = IntervalTimer::new(0, 10);
    timer.advance(4_294_967_294);
    assert_eq!(timer.elapsed(1), 3);
}

#[test]
fn elapsed_from_max_to_zero_is_one() {
    let mut timer = IntervalTimer::new(u32::MAX, 1);
    assert_eq!(timer.elapsed(0), 1);
    assert!(timer.expired(0));
}

#[test]
fn elapsed_is_modular_difference() {
    let pairs = [
        (0, 0),
        (0, 1),
        (5, 3),
        (u32::MAX, u32::MAX),
        (u32::MAX - 10, 10),
        (1 << 31, 0),
        (123_456, 654_321),
    ];

    for (previous, now) in pairs {
        let mut timer = IntervalTimer::new(previous, 0);
        let expected = ((now as u64 + (1u64 << 32) - previous as u64) % (1u64 << 32)) as u32;
        assert_eq!(timer.elapsed(now), expected, "previous={} now={}", previous, now);
    }
}

#[test]
fn elapsed_caches_delta_without_moving_previous() {
    let mut timer = IntervalTimer::new(100, 50);
    assert_eq!(timer.elapsed(130), 30);
    assert_eq!(timer.delta, 30);
    assert_eq!(timer.previous, 100);
}

#[test]
fn expired_matches_elapsed_comparison() {
    let mut timer = IntervalTimer::new(u32::MAX - 5, 8);
    for now in [u32::MAX - 5, u32::MAX, 0, 1, 2, 3, 100] {
        let expired = timer.expired(now);
        assert_eq!(expired, timer.elapsed(now) >= timer.interval, "now={}", now);
    }
}

#[test]
fn expired_is_idempotent() {
    let timer = IntervalTimer::new(0, 10);
    let first = timer.expired(10);
    for _ in 0..5 {
        assert_eq!(timer.expired(10), first);
    }
    assert_eq!(timer.previous, 0);
}

#[test]
fn zero_interval_always_expired() {
    let timer = IntervalTimer::new(500, 0);
    assert!(timer.expired(500));
    assert!(timer.expired(501));
    assert!(timer.expired(u32::MAX));
}

#[test]
fn freely_constructible() {
    let timer = IntervalTimer {
        previous: 7,
        delta: 42,
        interval: 3,
    };
    assert!(timer.expired(10));
    assert_eq!(IntervalTimer::default(), IntervalTimer::new(0, 0));
}

#[test]
fn poll_advances_only_on_expiry() {
    let mut timer = IntervalTimer::new(0, 100);
    assert!(!timer.poll(99));
    assert_eq!(timer.previous, 0);

    assert!(timer.poll(105));
    assert_eq!(timer.previous, 105);
    assert!(!timer.poll(204));
    assert!(timer.poll(205));
}

#[test]
fn remaining_counts_down_to_zero() {
    let timer = IntervalTimer::new(u32::MAX - 1, 10);
    assert_eq!(timer.remaining(u32::MAX - 1), 10);
    assert_eq!(timer.remaining(2), 6);
    assert_eq!(timer.remaining(8), 0);
    assert_eq!(timer.remaining(50), 0);
}
