//! Digital temperature sensor on the shared I2C bus
//!
//! One reading is a two-phase transaction:
//!
//! ```text
//! WRITE [0x04, 0b0110_0000]   configuration register
//! WRITE [0x00]                point at the temperature register
//! READ  [high, low]
//! ```
//!
//! Any bus error (NACK, timeout) aborts the transaction and the reading
//! degrades to [`Reading::Unavailable`]. The error never leaves this module.

use crate::calibration::raw_register_to_celsius;
use crate::constants::sensors::{
    TEMP_CONFIG_REGISTER, TEMP_CONFIG_VALUE, TEMP_RESULT_REGISTER, TEMP_SENSOR_I2C_ADDR,
};
use crate::traits::I2cBus;

use super::Reading;

/// Temperature sensor
#[derive(Debug)]
pub struct TemperatureSensor<B: I2cBus> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> TemperatureSensor<B> {
    /// Sensor at the reference address
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, TEMP_SENSOR_I2C_ADDR)
    }

    /// Sensor strapped to another address
    pub fn with_address(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Device address on the bus
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Temperature in °C, or `Unavailable` if the bus transaction failed
    pub fn read(&mut self) -> Reading {
        match self.read_celsius() {
            Ok(celsius) => Reading::Value(celsius),
            Err(e) => {
                log_warn!("Error reading temperature at 0x{:02x}: {:?}", self.address, e);
                Reading::Unavailable
            }
        }
    }

    /// Run the bus transaction, propagating bus errors
    pub fn read_celsius(&mut self) -> Result<f32, B::Error> {
        self.bus
            .write(self.address, &[TEMP_CONFIG_REGISTER, TEMP_CONFIG_VALUE])?;
        self.bus.write(self.address, &[TEMP_RESULT_REGISTER])?;

        let mut raw = [0u8; 2];
        self.bus.read(self.address, &mut raw)?;

        Ok(raw_register_to_celsius(raw[0], raw[1]))
    }
}
