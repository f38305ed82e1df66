//! Sensor Interface: Peripheral Reads into Calibrated Samples
//!
//! ## Overview
//!
//! Each sensor owns its peripheral handle (see [`crate::traits`]), performs
//! the physical read and hands the raw code to the calibration engine. A
//! sensor never returns an error to its caller: failures are confined to the
//! sensor and surface as [`Reading::Unavailable`].
//!
//! | Sensor        | Peripheral      | Failure mode                           |
//! |---------------|-----------------|----------------------------------------|
//! | Soil moisture | ADC             | none, analog reads always succeed      |
//! | Light         | ADC             | saturated divider → brightest lux      |
//! | Temperature   | I2C             | bus error → `Unavailable`              |
//!
//! ## Why per-sensor isolation?
//!
//! One dead sensor should cost one field of the payload, not the whole
//! sampling cycle. A missing temperature probe still leaves light and soil
//! data worth publishing.
//!
//! ## Usage Example
//!
//! ```rust
//! use smartfarm_core::sensors::{SensorSuite, LightSensor, SoilMoistureSensor, TemperatureSensor};
//! use smartfarm_core::traits::{AnalogInput, I2cBus};
//!
//! struct FixedAdc(u16);
//! impl AnalogInput for FixedAdc {
//!     fn read_raw(&mut self) -> u16 { self.0 }
//! }
//!
//! struct DeadBus;
//! impl I2cBus for DeadBus {
//!     type Error = ();
//!     fn write(&mut self, _: u8, _: &[u8]) -> Result<(), ()> { Err(()) }
//!     fn read(&mut self, _: u8, _: &mut [u8]) -> Result<(), ()> { Err(()) }
//! }
//!
//! let mut suite = SensorSuite::new(
//!     LightSensor::new(FixedAdc(2048)),
//!     SoilMoistureSensor::new(FixedAdc(4095)),
//!     TemperatureSensor::new(DeadBus),
//! );
//!
//! let samples = suite.read_all();
//! assert_eq!(samples.soil_moisture_pct, 0.0);
//! assert!(!samples.temperature_c.is_available());
//! ```

mod light;
mod soil;
mod temperature;

pub use light::LightSensor;
pub use soil::SoilMoistureSensor;
pub use temperature::TemperatureSensor;

use crate::traits::{AnalogInput, I2cBus};

/// A calibrated value, or the marker for a sensor that could not be read
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Value in the sensor's engineering unit
    Value(f32),
    /// Sensor failed this cycle
    Unavailable,
}

impl Reading {
    /// The value, if the sensor produced one
    pub fn value(self) -> Option<f32> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::Unavailable => None,
        }
    }

    /// True when a value is present
    pub fn is_available(self) -> bool {
        matches!(self, Reading::Value(_))
    }

    /// Transform the value, keeping `Unavailable` as is
    pub fn map(self, f: impl FnOnce(f32) -> f32) -> Self {
        match self {
            Reading::Value(v) => Reading::Value(f(v)),
            Reading::Unavailable => Reading::Unavailable,
        }
    }
}

impl From<Option<f32>> for Reading {
    fn from(value: Option<f32>) -> Self {
        value.map_or(Reading::Unavailable, Reading::Value)
    }
}

/// Calibrated readings of one sampling cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSet {
    /// Illuminance in lux
    pub lux: Reading,
    /// Soil moisture in percent
    pub soil_moisture_pct: f32,
    /// Ambient temperature in °C
    pub temperature_c: Reading,
}

/// The three sensors of the node, read together once per cycle
///
/// `N` is the size of the light sensor's calibration table.
pub struct SensorSuite<L, S, T, const N: usize = 6>
where
    L: AnalogInput,
    S: AnalogInput,
    T: I2cBus,
{
    light: LightSensor<L, N>,
    soil: SoilMoistureSensor<S>,
    temperature: TemperatureSensor<T>,
}

impl<L, S, T, const N: usize> SensorSuite<L, S, T, N>
where
    L: AnalogInput,
    S: AnalogInput,
    T: I2cBus,
{
    /// Group the sensors of a board
    pub fn new(
        light: LightSensor<L, N>,
        soil: SoilMoistureSensor<S>,
        temperature: TemperatureSensor<T>,
    ) -> Self {
        Self { light, soil, temperature }
    }

    /// Read light, soil and temperature in that order.
    ///
    /// Never fails; a broken sensor only blanks its own field.
    pub fn read_all(&mut self) -> SampleSet {
        let lux = self.light.read();
        let soil_moisture_pct = self.soil.read();
        let temperature_c = self.temperature.read();

        SampleSet {
            lux,
            soil_moisture_pct,
            temperature_c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_accessors() {
        assert_eq!(Reading::Value(1.5).value(), Some(1.5));
        assert_eq!(Reading::Unavailable.value(), None);
        assert!(Reading::Value(0.0).is_available());
        assert_eq!(Reading::from(None), Reading::Unavailable);
        assert_eq!(Reading::Value(2.0).map(|v| v * 2.0), Reading::Value(4.0));
        assert_eq!(Reading::Unavailable.map(|v| v * 2.0), Reading::Unavailable);
    }

    struct Code(u16);

    impl AnalogInput for Code {
        fn read_raw(&mut self) -> u16 {
            self.0
        }
    }

    struct Silent;

    impl I2cBus for Silent {
        type Error = ();

        fn write(&mut self, _addr: u8, _bytes: &[u8]) -> Result<(), ()> {
            Err(())
        }

        fn read(&mut self, _addr: u8, _buffer: &mut [u8]) -> Result<(), ()> {
            Err(())
        }
    }

    #[test]
    fn suite_accepts_custom_table_size() {
        use crate::calibration::{CalibrationTable, ControlPoint, DividerConfig};

        let table = CalibrationTable::from_points(&[
            ControlPoint { resistance_kohm: 100.0, lux: 1.0 },
            ControlPoint { resistance_kohm: 10.0, lux: 10.0 },
            ControlPoint { resistance_kohm: 1.0, lux: 100.0 },
        ])
        .unwrap();
        let light = LightSensor::with_calibration(Code(0), DividerConfig::default(), table);

        let mut suite: SensorSuite<Code, Code, Silent, 3> =
            SensorSuite::new(light, SoilMoistureSensor::new(Code(4095)), TemperatureSensor::new(Silent));
        let samples = suite.read_all();

        // Zero code is 0 ohm: the brightest point of the custom table
        assert_eq!(samples.lux, Reading::Value(100.0));
        assert_eq!(samples.soil_moisture_pct, 0.0);
        assert_eq!(samples.temperature_c, Reading::Unavailable);
    }
}
