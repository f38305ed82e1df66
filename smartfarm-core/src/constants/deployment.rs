//! Deployment Identity
//!
//! The node is stationary, so its coordinates are constants published with
//! every payload.

/// MQTT topic identifying the deployment.
pub const DEFAULT_TOPIC: &str = "b6610545901/smartfarm";

/// Latitude of the field (decimal degrees).
pub const DEFAULT_LATITUDE: f64 = 13.8657;

/// Longitude of the field (decimal degrees).
pub const DEFAULT_LONGITUDE: f64 = 100.462;
