//! Error Types for Calibration and Payload Encoding
//!
//! ## Design Philosophy
//!
//! The calibration engine runs on the node itself, so its errors follow the
//! same rules as everything else in the hot path:
//!
//! 1. **Small Size**: variants carry at most a couple of `f32`s.
//! 2. **No Heap Allocation**: no `String`, only inline data.
//! 3. **Copy Semantics**: errors are returned by value from pure functions.
//!
//! ## Error Categories
//!
//! ### Runtime Boundaries
//! - `DividerSaturated`: the ADC reads the full supply voltage, so the
//!   voltage divider cannot be inverted (division by zero).
//! - `InvalidResistance`: a resistance that is NaN or negative reached the
//!   interpolator.
//!
//! ### Configuration Bugs
//! - `EmptyTable` / `InvalidControlPoint` / `NonMonotonic`: the calibration
//!   table itself is broken.
//!   These are caught when the table is constructed, never per reading.
//!
//! Sensors decide how each error degrades: a saturated divider becomes the
//! brightest table value, anything else becomes an unavailable reading.

use thiserror_no_std::Error;

/// Result type for calibration operations
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Calibration errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    /// ADC voltage reached the supply rail; divider inversion divides by zero
    #[error("Divider saturated: {voltage} V at supply {supply} V")]
    DividerSaturated {
        /// Voltage derived from the ADC code
        voltage: f32,
        /// Supply voltage of the divider
        supply: f32,
    },

    /// Resistance is NaN or negative
    #[error("Invalid resistance: {ohms} ohm")]
    InvalidResistance {
        /// The offending resistance in ohms
        ohms: f32,
    },

    /// Calibration table has fewer than two control points
    #[error("Calibration table needs at least two control points")]
    EmptyTable,

    /// Control point with a zero, negative or non-finite coordinate
    #[error("Invalid calibration control point {index}")]
    InvalidControlPoint {
        /// Index of the offending control point
        index: usize,
    },

    /// Control points are not strictly monotonic on both axes
    #[error("Calibration table not monotonic at control point {index}")]
    NonMonotonic {
        /// Index of the first control point that breaks the ordering
        index: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalibrationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::DividerSaturated { voltage, supply } =>
                defmt::write!(fmt, "Divider saturated: {} V at {} V", voltage, supply),
            Self::InvalidResistance { ohms } =>
                defmt::write!(fmt, "Invalid resistance: {}", ohms),
            Self::EmptyTable =>
                defmt::write!(fmt, "Empty calibration table"),
            Self::InvalidControlPoint { index } =>
                defmt::write!(fmt, "Invalid control point {}", index),
            Self::NonMonotonic { index } =>
                defmt::write!(fmt, "Table not monotonic at {}", index),
        }
    }
}

/// Payload encoding errors
#[cfg(feature = "std")]
#[derive(Error, Debug)]
pub enum PayloadError {
    /// JSON serialization failed
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}
