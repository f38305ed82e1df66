//! Calibration Engine: Raw Transducer Codes to Engineering Units
//!
//! ## Overview
//!
//! Every function in this module is pure: no I/O, no state beyond the
//! constant calibration table. Sensors call into it after reading a raw code
//! from a peripheral.
//!
//! | Quantity      | Raw input              | Output            |
//! |---------------|------------------------|-------------------|
//! | Soil moisture | 12-bit ADC code        | % in [0, 100]     |
//! | Light         | 12-bit ADC code        | Ω, then lux       |
//! | Temperature   | two register bytes     | °C                |
//!
//! ## Soil Moisture
//!
//! The capacitive probe reads high when dry, so the mapping is a linear
//! inversion of the ADC range:
//!
//! ```text
//! moisture = (4095 - code) / 4095 × 100      clamped to [0, 100]
//! ```
//!
//! ## Photoresistor Divider
//!
//! The LDR sits on the low side of a divider with a fixed resistor, so the
//! ADC voltage grows with the LDR resistance:
//!
//! ```text
//! V = code × Vs / 4095
//! R = ((V / Vs) × Rf) / (1 - V / Vs)
//! ```
//!
//! At `V = Vs` the denominator is zero. That boundary is reported as
//! [`CalibrationError::DividerSaturated`] and never reaches a division.
//!
//! ## Log-Log Interpolation
//!
//! LDR datasheets give resistance against illuminance as a straight line on a
//! log-log plot, piecewise across the decades. The table keeps
//! `(log10 kΩ, log10 lux)` control points and interpolates linearly between
//! the two bracketing points:
//!
//! ```text
//! logLux = logLux[i] + (logR - logR[i]) × (logLux[i+1] - logLux[i]) / (logR[i+1] - logR[i])
//! lux    = 10^logLux
//! ```
//!
//! Outside the table the result is clamped to the darkest or brightest
//! control point.
//!
//! ## Temperature Register
//!
//! The sensor returns a fixed-point value with 1/128 °C per LSB:
//!
//! ```text
//! celsius = (low + high × 256) / 128
//! ```
//!
//! The sign bit is not interpreted; readings below 0 °C are out of scope for
//! the current deployment.

use crate::constants::sensors::{
    ADC_FULL_SCALE, DIVIDER_PULLDOWN_OHMS, DIVIDER_SUPPLY_VOLTAGE, SOIL_MOISTURE_MAX_PCT,
    SOIL_MOISTURE_MIN_PCT, TEMP_LSB_PER_CELSIUS,
};
use crate::errors::{CalibrationError, CalibrationResult};

/// Convert a soil probe ADC code to moisture percent.
///
/// Codes above the ADC range are clamped, not rejected.
pub fn soil_moisture_percent(adc_value: u16) -> f32 {
    let moisture = (ADC_FULL_SCALE - adc_value as f32) / ADC_FULL_SCALE * 100.0;
    moisture.clamp(SOIL_MOISTURE_MIN_PCT, SOIL_MOISTURE_MAX_PCT)
}

/// Photoresistor divider wiring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerConfig {
    /// Supply voltage across the divider (V)
    pub supply_voltage: f32,
    /// Fixed resistor (Ω)
    pub pulldown_ohms: f32,
}

impl Default for DividerConfig {
    fn default() -> Self {
        Self {
            supply_voltage: DIVIDER_SUPPLY_VOLTAGE,
            pulldown_ohms: DIVIDER_PULLDOWN_OHMS,
        }
    }
}

/// Convert a photoresistor ADC code to the LDR resistance in ohms.
///
/// Returns [`CalibrationError::DividerSaturated`] when the ADC sits at (or
/// above) the supply rail.
pub fn light_resistance_ohms(adc_value: u16, divider: &DividerConfig) -> CalibrationResult<f32> {
    let voltage = adc_value as f32 * divider.supply_voltage / ADC_FULL_SCALE;
    // V / Vs taken from the code itself so full scale is exactly 1.0
    let ratio = adc_value as f32 / ADC_FULL_SCALE;

    if ratio >= 1.0 {
        return Err(CalibrationError::DividerSaturated {
            voltage,
            supply: divider.supply_voltage,
        });
    }

    Ok((ratio * divider.pulldown_ohms) / (1.0 - ratio))
}

/// Combine the two temperature register bytes into °C.
pub fn raw_register_to_celsius(high: u8, low: u8) -> f32 {
    (low as f32 + high as f32 * 256.0) / TEMP_LSB_PER_CELSIUS
}

/// One (resistance, illuminance) pair from the LDR datasheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// LDR resistance in kΩ
    pub resistance_kohm: f32,
    /// Illuminance in lux
    pub lux: f32,
}

/// Datasheet points of the photoresistor fitted on the reference board.
pub const REFERENCE_CONTROL_POINTS: [ControlPoint; 6] = [
    ControlPoint { resistance_kohm: 900.0, lux: 0.1 },
    ControlPoint { resistance_kohm: 100.0, lux: 1.0 },
    ControlPoint { resistance_kohm: 10.0, lux: 10.0 },
    ControlPoint { resistance_kohm: 4.0, lux: 100.0 },
    ControlPoint { resistance_kohm: 0.8, lux: 1000.0 },
    ControlPoint { resistance_kohm: 0.1, lux: 10000.0 },
];

/// Piecewise log-log calibration table
///
/// Control points are ordered darkest first: resistance strictly decreasing,
/// lux strictly increasing. Logarithms are computed once, when the table is
/// built, so a lookup costs one `log10` and one `pow`.
///
/// Memory usage: 12 bytes per control point.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable<const N: usize> {
    /// log10 of the resistance in kΩ
    log_resistance: [f32; N],
    /// log10 of the illuminance
    log_lux: [f32; N],
    /// Illuminance in lux, returned as-is at the clamps
    lux: [f32; N],
}

/// Table of the reference board, logarithms pre-computed.
pub const REFERENCE_TABLE: CalibrationTable<6> = CalibrationTable {
    log_resistance: [2.954_242_5, 2.0, 1.0, 0.602_059_99, -0.096_910_01, -1.0],
    log_lux: [-1.0, 0.0, 1.0, 2.0, 3.0, 4.0],
    lux: [0.1, 1.0, 10.0, 100.0, 1000.0, 10000.0],
};

impl<const N: usize> CalibrationTable<N> {
    /// Build a table from datasheet points.
    ///
    /// Rejects tables with fewer than two points and points that are not
    /// strictly monotonic, positive and finite.
    pub fn from_points(points: &[ControlPoint; N]) -> CalibrationResult<Self> {
        if N < 2 {
            return Err(CalibrationError::EmptyTable);
        }

        let mut log_resistance = [0.0; N];
        let mut log_lux = [0.0; N];
        let mut lux = [0.0; N];

        for (i, point) in points.iter().enumerate() {
            let usable = point.resistance_kohm.is_finite()
                && point.lux.is_finite()
                && point.resistance_kohm > 0.0
                && point.lux > 0.0;
            if !usable {
                return Err(CalibrationError::InvalidControlPoint { index: i });
            }

            log_resistance[i] = libm::log10f(point.resistance_kohm);
            log_lux[i] = libm::log10f(point.lux);
            lux[i] = point.lux;

            if i > 0 && !(log_resistance[i] < log_resistance[i - 1] && log_lux[i] > log_lux[i - 1]) {
                return Err(CalibrationError::NonMonotonic { index: i });
            }
        }

        Ok(Self { log_resistance, log_lux, lux })
    }

    /// Number of control points
    pub fn len(&self) -> usize {
        N
    }

    /// Always false for a constructed table
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    /// Darkest illuminance the table can report
    pub fn min_lux(&self) -> f32 {
        self.lux[0]
    }

    /// Brightest illuminance the table can report
    pub fn max_lux(&self) -> f32 {
        self.lux[N - 1]
    }

    /// Convert an LDR resistance in ohms to lux.
    ///
    /// Every finite, non-negative resistance yields a value; zero and
    /// anything below the last control point give [`Self::max_lux`].
    pub fn interpolate_lux(&self, resistance_ohms: f32) -> CalibrationResult<f32> {
        if resistance_ohms.is_nan() || resistance_ohms < 0.0 {
            return Err(CalibrationError::InvalidResistance { ohms: resistance_ohms });
        }

        let log_r = libm::log10f(resistance_ohms / 1000.0);

        if log_r > self.log_resistance[0] {
            log_debug!("Lux lookup: {} ohm darker than table, clamped", resistance_ohms);
            return Ok(self.min_lux());
        }
        if log_r < self.log_resistance[N - 1] {
            log_debug!("Lux lookup: {} ohm brighter than table, clamped", resistance_ohms);
            return Ok(self.max_lux());
        }

        for i in 0..N - 1 {
            let (r0, r1) = (self.log_resistance[i], self.log_resistance[i + 1]);
            if r0 >= log_r && log_r >= r1 {
                let (l0, l1) = (self.log_lux[i], self.log_lux[i + 1]);
                let log_lux = l0 + (log_r - r0) * (l1 - l0) / (r1 - r0);
                return Ok(libm::powf(10.0, log_lux));
            }
        }

        // Only reachable with a table that skipped validation
        Err(CalibrationError::NonMonotonic { index: 0 })
    }
}

/// Free-function form of [`CalibrationTable::interpolate_lux`].
pub fn interpolate_lux<const N: usize>(
    resistance_ohms: f32,
    table: &CalibrationTable<N>,
) -> CalibrationResult<f32> {
    table.interpolate_lux(resistance_ohms)
}
