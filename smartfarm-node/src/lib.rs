//! SmartFarm telemetry node
//!
//! Glue between the calibration engine, the uplink and the board:
//!
//! 1. [`config`] reads the deployment settings from the environment.
//! 2. [`bootstrap`] joins Wi-Fi (waiting indefinitely) and opens the broker
//!    session (one attempt).
//! 3. [`telemetry`] samples and publishes once per period, forever.
//!
//! [`hal`] provides the Linux implementations of the peripheral traits.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod config;
pub mod hal;
pub mod telemetry;

pub use bootstrap::{bootstrap, BootstrapError, NodeContext};
pub use config::{ConfigError, NodeConfig};
pub use telemetry::{CycleOutcome, TelemetryLoop};
