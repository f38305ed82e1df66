//! Property tests for the calibration engine
//!
//! These pin down the invariants the node relies on across the whole input
//! domain, not just the datasheet points.

use proptest::prelude::*;

use smartfarm_core::calibration::{
    interpolate_lux, light_resistance_ohms, raw_register_to_celsius, soil_moisture_percent,
    DividerConfig, REFERENCE_CONTROL_POINTS, REFERENCE_TABLE,
};

proptest! {
    #[test]
    fn soil_moisture_bounded(code in 0u16..=u16::MAX) {
        let pct = soil_moisture_percent(code);
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn soil_moisture_decreasing(a in 0u16..=4095, b in 0u16..=4095) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(soil_moisture_percent(low) >= soil_moisture_percent(high));
    }

    #[test]
    fn lux_non_increasing_in_resistance(r1 in 1.0f32..10_000_000.0, r2 in 1.0f32..10_000_000.0) {
        let (small, large) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        let bright = interpolate_lux(small, &REFERENCE_TABLE).unwrap();
        let dark = interpolate_lux(large, &REFERENCE_TABLE).unwrap();
        // a couple of ulps of slack for values straddling a knot
        prop_assert!(bright >= dark * (1.0 - 1e-5), "{} -> {}, {} -> {}", small, bright, large, dark);
    }

    #[test]
    fn lux_within_table_range(r in 0.0f32..1e9) {
        let lux = REFERENCE_TABLE.interpolate_lux(r).unwrap();
        prop_assert!(lux >= REFERENCE_TABLE.min_lux() * (1.0 - 1e-5));
        prop_assert!(lux <= REFERENCE_TABLE.max_lux() * (1.0 + 1e-5));
    }

    #[test]
    fn lux_constant_beyond_clamps(dark in 901_000.0f32..1e12, bright in 0.0f32..99.9) {
        prop_assert_eq!(REFERENCE_TABLE.interpolate_lux(dark).unwrap(), 0.1);
        prop_assert_eq!(REFERENCE_TABLE.interpolate_lux(bright).unwrap(), 10000.0);
    }

    #[test]
    fn light_resistance_defined_below_rail(code in 0u16..4095) {
        let r = light_resistance_ohms(code, &DividerConfig::default()).unwrap();
        prop_assert!(r.is_finite() && r >= 0.0);
        prop_assert!(REFERENCE_TABLE.interpolate_lux(r).is_ok());
    }

    #[test]
    fn celsius_linear_in_register(high in 0u8..=255, low in 0u8..=255) {
        let raw = u16::from_be_bytes([high, low]) as f32;
        prop_assert_eq!(raw_register_to_celsius(high, low), raw / 128.0);
    }
}

#[test]
fn knots_return_their_lux() {
    for point in REFERENCE_CONTROL_POINTS.iter() {
        let lux = REFERENCE_TABLE
            .interpolate_lux(point.resistance_kohm * 1000.0)
            .unwrap();
        assert!(
            (lux - point.lux).abs() <= point.lux * 1e-4,
            "{} kΩ: expected {}, got {}",
            point.resistance_kohm,
            point.lux,
            lux
        );
    }
}

#[test]
fn datasheet_clamp_examples() {
    assert_eq!(REFERENCE_TABLE.interpolate_lux(5_000_000.0).unwrap(), 0.1);
    assert_eq!(REFERENCE_TABLE.interpolate_lux(10.0).unwrap(), 10000.0);
}
