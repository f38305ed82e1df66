//! MQTT connector
//!
//! Thin wrapper over a `rumqttc` session with a strict attempt policy:
//!
//! - [`MqttConnector::connect`] performs one TCP connect and one MQTT
//!   handshake. Refusal, timeout or a transport error is returned to the
//!   caller as is; nothing is retried.
//! - After the handshake a background task drives the session (keep-alive,
//!   outgoing publishes). The first error ends that task and marks the
//!   session lost. It is never re-established.
//! - [`MqttConnector::publish`] queues one QoS 0 message without waiting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, trace};
use rumqttc::{AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Packet};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{AsyncConnector, ConnectionStats};

pub use rumqttc::QoS;

/// Standard unencrypted MQTT port
pub const DEFAULT_PORT: u16 = 1883;

const DEFAULT_KEEP_ALIVE: Duration = Duration::from_secs(60);
const DEFAULT_CHANNEL_CAPACITY: usize = 10;

/// MQTT connector errors
#[derive(Debug, Error)]
pub enum MqttError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Broker refused connection: {0}")]
    Refused(String),

    #[error("Connection failed: {0}")]
    Transport(String),

    #[error("Broker answered handshake with {0}")]
    UnexpectedPacket(String),

    #[error("Session lost; restart required")]
    SessionLost,

    #[error("Publish rejected: {0}")]
    Client(String),
}

/// Broker endpoint and session options
#[derive(Debug, Clone, PartialEq)]
pub struct MqttConfig {
    pub client_id: String,
    pub host: String,
    pub port: u16,
    pub credentials: Option<(String, String)>,
    pub keep_alive: Duration,
    /// Outgoing requests buffered between the client and the session task
    pub channel_capacity: usize,
}

impl MqttConfig {
    pub fn new(client_id: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            client_id: client_id.into(),
            host: host.into(),
            port,
            credentials: None,
            keep_alive: DEFAULT_KEEP_ALIVE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Authenticate with username and password
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((user.into(), password.into()));
        self
    }

    pub fn with_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    /// Reject settings the client library would panic on
    pub fn validate(&self) -> Result<(), MqttError> {
        if self.client_id.is_empty() {
            return Err(MqttError::Config("client id must not be empty".into()));
        }
        if self.client_id.starts_with(' ') {
            return Err(MqttError::Config("client id must not start with a space".into()));
        }
        if self.host.is_empty() {
            return Err(MqttError::Config("broker host must not be empty".into()));
        }
        if self.keep_alive.as_secs() < 5 {
            return Err(MqttError::Config("keep-alive must be at least 5 seconds".into()));
        }
        if self.channel_capacity == 0 {
            return Err(MqttError::Config("channel capacity must be positive".into()));
        }
        Ok(())
    }

    fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(&self.client_id, &self.host, self.port);
        options.set_keep_alive(self.keep_alive);
        options.set_clean_session(true);
        if let Some((user, password)) = &self.credentials {
            options.set_credentials(user, password);
        }
        options
    }
}

/// A live broker session
///
/// Must be created inside a Tokio runtime; the session task is spawned on it.
pub struct MqttConnector {
    client: AsyncClient,
    alive: Arc<AtomicBool>,
    driver: JoinHandle<()>,
    stats: ConnectionStats,
}

impl MqttConnector {
    /// Open the session, exactly one attempt
    pub async fn connect(config: MqttConfig) -> Result<Self, MqttError> {
        config.validate()?;
        info!("Connecting to MQTT broker {}:{}", config.host, config.port);

        let (client, mut eventloop) = AsyncClient::new(config.options(), config.channel_capacity);

        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                debug!("CONNACK received, session present: {}", ack.session_present);
            }
            Ok(other) => return Err(MqttError::UnexpectedPacket(format!("{other:?}"))),
            Err(ConnectionError::ConnectionRefused(code)) => {
                return Err(MqttError::Refused(format!("{code:?}")));
            }
            Err(e) => return Err(MqttError::Transport(e.to_string())),
        }

        let alive = Arc::new(AtomicBool::new(true));
        let driver = tokio::spawn(drive_session(eventloop, Arc::clone(&alive)));
        info!("MQTT connected as {:?}", config.client_id);

        Ok(Self {
            client,
            alive,
            driver,
            stats: ConnectionStats::default(),
        })
    }

    /// Queue one QoS 0, non-retained message
    pub fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), MqttError> {
        let result = if self.is_connected() {
            self.client
                .try_publish(topic, QoS::AtMostOnce, false, payload.to_vec())
                .map_err(|e| MqttError::Client(e.to_string()))
        } else {
            Err(MqttError::SessionLost)
        };

        match &result {
            Ok(()) => {
                trace!("Queued {} bytes for {}", payload.len(), topic);
                self.stats.record_sent(payload.len());
            }
            Err(e) => self.stats.record_failure(e),
        }
        result
    }
}

impl Drop for MqttConnector {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

#[async_trait::async_trait]
impl AsyncConnector for MqttConnector {
    type Error = MqttError;

    async fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        self.publish(topic, data)
    }

    fn is_connected(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    fn stats(&self) -> ConnectionStats {
        self.stats.clone()
    }
}

/// Drive the session until its first error
async fn drive_session(mut eventloop: EventLoop, alive: Arc<AtomicBool>) {
    loop {
        match eventloop.poll().await {
            Ok(event) => trace!("MQTT event: {:?}", event),
            Err(e) => {
                error!("MQTT session lost: {}", e);
                alive.store(false, Ordering::Release);
                return;
            }
        }
    }
}
