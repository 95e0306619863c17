use std::string::ToString;

use crate::config::{ConfigError, Prescaler, TimebaseConfig};

#[test]
fn default_is_16mhz_div64() {
    let cfg = TimebaseConfig::DEFAULT;
    assert_eq!(cfg.cpu_hz(), 16_000_000);
    assert_eq!(cfg.prescaler(), Prescaler::Div64);
    assert_eq!(cfg.compare_value(), 249);
    assert_eq!(cfg.timer_hz(), 250_000);
    assert_eq!(cfg.counts_per_tick(), 250);
}

#[test]
fn default_period_is_exact() {
    let cfg = TimebaseConfig::default();
    assert_eq!(cfg.period_ns(), 1_000_000);
    assert_eq!(cfg.error_ppm(), 0);
}

#[test]
fn computed_default_matches_constant() {
    let cfg = TimebaseConfig::new(16_000_000, Prescaler::Div64).unwrap();
    assert_eq!(cfg, TimebaseConfig::DEFAULT);
}

#[test]
fn eight_mhz_div64() {
    let cfg = TimebaseConfig::new(8_000_000, Prescaler::Div64).unwrap();
    assert_eq!(cfg.compare_value(), 124);
    assert_eq!(cfg.error_ppm(), 0);
}

#[test]
fn inexact_threshold_runs_slow() {
    // 15.625 counts per ms rounds up to 16
    let cfg = TimebaseConfig::new(16_000_000, Prescaler::Div1024).unwrap();
    assert_eq!(cfg.compare_value(), 15);
    assert_eq!(cfg.period_ns(), 1_024_000);
    assert_eq!(cfg.error_ppm(), 24_000);
}

#[test]
fn inexact_threshold_runs_fast() {
    // 78.125 counts per ms rounds down to 78
    let cfg = TimebaseConfig::new(20_000_000, Prescaler::Div256).unwrap();
    assert_eq!(cfg.compare_value(), 77);
    assert_eq!(cfg.period_ns(), 998_400);
    assert_eq!(cfg.error_ppm(), -1_600);
}

#[test]
fn threshold_must_fit_eight_bits() {
    assert_eq!(
        TimebaseConfig::new(20_000_000, Prescaler::Div64),
        Err(ConfigError::ThresholdOverflow)
    );
    assert_eq!(
        TimebaseConfig::new(16_000_000, Prescaler::Direct),
        Err(ConfigError::ThresholdOverflow)
    );
}

#[test]
fn zero_frequency_rejected() {
    assert_eq!(
        TimebaseConfig::new(0, Prescaler::Div64),
        Err(ConfigError::ZeroFrequency)
    );
}

#[test]
fn slow_clock_rejected() {
    assert_eq!(
        TimebaseConfig::new(500_000, Prescaler::Div1024),
        Err(ConfigError::ClockTooSlow)
    );
}

#[test]
fn clock_select_bits() {
    assert_eq!(Prescaler::Direct.clock_select(), 0b001);
    assert_eq!(Prescaler::Div8.clock_select(), 0b010);
    assert_eq!(Prescaler::Div64.clock_select(), 0b011);
    assert_eq!(Prescaler::Div256.clock_select(), 0b100);
    assert_eq!(Prescaler::Div1024.clock_select(), 0b101);
}

#[test]
fn display() {
    assert_eq!(
        TimebaseConfig::DEFAULT.to_string(),
        "16000000Hz/64 cmp=249 (0ppm)"
    );
    assert_eq!(
        ConfigError::ThresholdOverflow.to_string(),
        "Compare threshold does not fit in 8 bits"
    );
}
