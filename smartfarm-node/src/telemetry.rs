//! Sampling loop
//!
//! One cycle reads every sensor, encodes a payload and makes exactly one
//! publish attempt. Nothing inside a cycle can stop the loop: sensor faults
//! blank a field, and encoding or publish failures skip the cycle.

use std::time::Duration;

use log::{debug, info, warn};
use smartfarm_connectors::AsyncConnector;
use smartfarm_core::{AnalogInput, I2cBus, Location, Payload, SensorSuite};

/// How a cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Payload handed to the session
    Published,
    /// Encoding or publishing failed; the payload was dropped
    Skipped,
}

pub struct TelemetryLoop<L, S, T, C>
where
    L: AnalogInput,
    S: AnalogInput,
    T: I2cBus,
    C: AsyncConnector,
{
    sensors: SensorSuite<L, S, T>,
    connector: C,
    topic: String,
    location: Location,
    period: Duration,
    cycles: u64,
}

impl<L, S, T, C> TelemetryLoop<L, S, T, C>
where
    L: AnalogInput,
    S: AnalogInput,
    T: I2cBus,
    C: AsyncConnector,
{
    pub fn new(
        sensors: SensorSuite<L, S, T>,
        connector: C,
        topic: impl Into<String>,
        location: Location,
        period: Duration,
    ) -> Self {
        Self {
            sensors,
            connector,
            topic: topic.into(),
            location,
            period,
            cycles: 0,
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Cycles completed so far, published or not
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Sample, encode and publish once
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let samples = self.sensors.read_all();
        let payload = Payload::new(samples, self.location);
        self.cycles += 1;

        let json = match payload.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Cycle {}: payload encoding failed: {}", self.cycles, e);
                return CycleOutcome::Skipped;
            }
        };

        match self.connector.send(&self.topic, json.as_bytes()).await {
            Ok(()) => {
                info!("Published: {}", json);
                CycleOutcome::Published
            }
            Err(e) => {
                warn!("Cycle {}: publish failed: {}", self.cycles, e);
                CycleOutcome::Skipped
            }
        }
    }

    /// Run cycles forever, one per period
    ///
    /// Never returns. A lost session is not re-established; later cycles
    /// keep sampling and keep failing to publish until the process restarts.
    pub async fn run(mut self) {
        info!(
            "Sampling every {}s, publishing to {}",
            self.period.as_secs(),
            self.topic
        );
        loop {
            self.run_cycle().await;

            let stats = self.connector.stats();
            debug!(
                "After {} cycles: {} published, {} failed, {} bytes",
                self.cycles, stats.messages_sent, stats.messages_failed, stats.bytes_sent
            );

            tokio::time::sleep(self.period).await;
        }
    }
}
