//! Capacitive soil moisture probe on an ADC channel

use crate::calibration::soil_moisture_percent;
use crate::traits::AnalogInput;

/// Soil moisture sensor
#[derive(Debug)]
pub struct SoilMoistureSensor<A: AnalogInput> {
    adc: A,
}

impl<A: AnalogInput> SoilMoistureSensor<A> {
    /// Wrap the ADC channel the probe is wired to
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Moisture in percent, always in [0, 100]
    pub fn read(&mut self) -> f32 {
        soil_moisture_percent(self.adc.read_raw())
    }
}
