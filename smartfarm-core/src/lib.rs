//! Core engine for the SmartFarm telemetry node
//!
//! Turns raw peripheral codes into calibrated readings and builds the
//! payload published every sampling cycle.
//! Designed to run on the node itself.
//!
//! Key constraints:
//! - Builds `no_std` (maths through `libm`)
//! - No heap allocation outside payload encoding
//! - Sensor failures degrade a single field, never the cycle
//!
//! ```no_run
//! use smartfarm_core::calibration::{soil_moisture_percent, REFERENCE_TABLE};
//!
//! let moisture = soil_moisture_percent(1800);
//! let lux = REFERENCE_TABLE.interpolate_lux(7_000.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $(let _ = &$arg;)* }};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $(let _ = &$arg;)* }};
}

pub mod calibration;
pub mod constants;
pub mod errors;
pub mod payload;
pub mod sensors;
pub mod traits;

// Public API
pub use calibration::{CalibrationTable, ControlPoint, DividerConfig, REFERENCE_TABLE};
pub use errors::{CalibrationError, CalibrationResult};
#[cfg(feature = "std")]
pub use errors::PayloadError;
pub use payload::{Location, Payload, UNAVAILABLE_MARKER};
pub use sensors::{LightSensor, Reading, SampleSet, SensorSuite, SoilMoistureSensor, TemperatureSensor};
pub use traits::{AnalogInput, I2cBus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
