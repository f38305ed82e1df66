//! Uplink for the SmartFarm telemetry node
//!
//! ## Overview
//!
//! Two concerns live here, both of them "getting bytes off the node":
//!
//! - [`network`]: bringing the Wi-Fi interface up and waiting, as long as it
//!   takes, for the station to obtain an address.
//! - [`mqtt`]: a single broker session used to publish one JSON payload per
//!   sampling cycle.
//!
//! ## Connection Policy
//!
//! The two connections deliberately behave differently:
//!
//! | Stage   | Attempts  | On failure                          |
//! |---------|-----------|-------------------------------------|
//! | Wi-Fi   | unbounded | keep polling, once per interval     |
//! | MQTT    | one       | error returned, caller decides      |
//! | Publish | one       | error returned, session not rebuilt |
//!
//! A session lost after the handshake stays lost until the process restarts.
//! Publishes made after that fail fast with [`mqtt::MqttError::SessionLost`].
//!
//! ## Delivery
//!
//! Publishes are fire-and-forget (QoS 0, not retained). With a 30 minute
//! sampling period a dropped message is simply replaced by the next one.
//!
//! ## Example Usage
//!
//! ```no_run
//! use smartfarm_connectors::{AsyncConnector, mqtt::{MqttConfig, MqttConnector}};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MqttConfig::new("smartfarm-node", "broker.local", 1883);
//! let mut mqtt = MqttConnector::connect(config).await?;
//!
//! mqtt.send("b6610545901/smartfarm", br#"{"lux":10.0}"#).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "mqtt")]
pub mod mqtt;

#[cfg(feature = "std")]
pub mod network;

// Re-export common types
#[cfg(feature = "mqtt")]
pub use mqtt::{MqttConfig, MqttConnector, MqttError, QoS};
#[cfg(feature = "std")]
pub use network::{connect_network, CredentialsError, NetworkHandle, NetworkLink, WifiCredentials};

/// Publishing side of a broker session
#[cfg(feature = "std")]
#[async_trait::async_trait]
pub trait AsyncConnector: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Publish one message; exactly one attempt is made
    async fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error>;

    /// Whether the session is still usable
    fn is_connected(&self) -> bool;

    /// Get connection statistics
    fn stats(&self) -> ConnectionStats;
}

/// Connection statistics common to all connectors
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConnectionStats {
    /// Total messages handed to the session
    pub messages_sent: u64,
    /// Total messages rejected before leaving the node
    pub messages_failed: u64,
    /// Total payload bytes handed to the session
    pub bytes_sent: u64,
    /// Last error message
    pub last_error: Option<String>,
}

#[cfg(feature = "std")]
impl ConnectionStats {
    /// Account for one successful publish of `bytes` payload bytes
    pub fn record_sent(&mut self, bytes: usize) {
        self.messages_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    /// Account for one failed publish
    pub fn record_failure(&mut self, error: &impl std::fmt::Display) {
        self.messages_failed += 1;
        self.last_error = Some(error.to_string());
    }
}
