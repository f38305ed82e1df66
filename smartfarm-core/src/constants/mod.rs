//! Constants for SmartFarm Core
//!
//! Centralized values for the reference deployment. Every numeric constant
//! the calibration engine and the sensors rely on lives here with its unit
//! in the name.
//!
//! ## Organization
//!
//! - **Sensors**: ADC geometry, divider wiring, temperature sensor bus layout
//! - **Time**: sampling cadence and connectivity polling
//! - **Deployment**: topic and fixed location of the node

/// ADC, voltage divider and temperature sensor characteristics.
pub mod sensors;

/// Sampling cadence and connectivity polling intervals.
pub mod time;

/// Deployment identity: topic and fixed coordinates.
pub mod deployment;

pub use sensors::{
    ADC_MAX_CODE, DIVIDER_SUPPLY_VOLTAGE, DIVIDER_PULLDOWN_OHMS, TEMP_SENSOR_I2C_ADDR,
};

pub use time::{DEFAULT_SAMPLE_PERIOD_SECS, NETWORK_POLL_INTERVAL_MS};

pub use deployment::{DEFAULT_TOPIC, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
