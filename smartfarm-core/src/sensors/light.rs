//! Photoresistor (LDR) light sensor
//!
//! The ADC code goes through the divider inversion, then the log-log
//! calibration table. When the ADC is pinned at the supply rail the divider
//! cannot be inverted; the reading falls back to the table's brightest value
//! instead of failing the cycle.

use crate::calibration::{
    light_resistance_ohms, CalibrationTable, DividerConfig, REFERENCE_TABLE,
};
use crate::errors::CalibrationError;
use crate::traits::AnalogInput;

use super::Reading;

/// Light sensor built from an LDR divider and a calibration table
#[derive(Debug)]
pub struct LightSensor<A: AnalogInput, const N: usize = 6> {
    adc: A,
    divider: DividerConfig,
    table: CalibrationTable<N>,
}

impl<A: AnalogInput> LightSensor<A> {
    /// Reference wiring and calibration table
    pub fn new(adc: A) -> Self {
        Self {
            adc,
            divider: DividerConfig::default(),
            table: REFERENCE_TABLE,
        }
    }
}

impl<A: AnalogInput, const N: usize> LightSensor<A, N> {
    /// Custom wiring or LDR part
    pub fn with_calibration(adc: A, divider: DividerConfig, table: CalibrationTable<N>) -> Self {
        Self { adc, divider, table }
    }

    /// Illuminance in lux
    pub fn read(&mut self) -> Reading {
        let code = self.adc.read_raw();

        let resistance = match light_resistance_ohms(code, &self.divider) {
            Ok(ohms) => ohms,
            Err(CalibrationError::DividerSaturated { voltage, .. }) => {
                log_warn!("Light sensor saturated at {} V, reporting table ceiling", voltage);
                return Reading::Value(self.table.max_lux());
            }
            Err(e) => {
                log_warn!("Light sensor conversion failed: {}", e);
                return Reading::Unavailable;
            }
        };

        match self.table.interpolate_lux(resistance) {
            Ok(lux) => Reading::Value(lux),
            Err(e) => {
                log_warn!("Light sensor interpolation failed: {}", e);
                Reading::Unavailable
            }
        }
    }
}
