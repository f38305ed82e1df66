//! Board and uplink doubles for node-level tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

use smartfarm_connectors::{AsyncConnector, ConnectionStats, NetworkLink, WifiCredentials};
use smartfarm_core::{
    AnalogInput, I2cBus, LightSensor, SensorSuite, SoilMoistureSensor, TemperatureSensor,
};
use thiserror::Error;

pub const NODE_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 42));

/// ADC channel stuck at one code
pub struct FixedAdc(pub u16);

impl AnalogInput for FixedAdc {
    fn read_raw(&mut self) -> u16 {
        self.0
    }
}

/// Temperature sensor bus: answers every read with `reply`, or NACKs
pub struct TempBus {
    pub reply: Option<[u8; 2]>,
}

impl TempBus {
    pub fn reading(high: u8, low: u8) -> Self {
        Self { reply: Some([high, low]) }
    }

    pub fn absent() -> Self {
        Self { reply: None }
    }
}

#[derive(Debug)]
pub struct Nack;

impl I2cBus for TempBus {
    type Error = Nack;

    fn write(&mut self, _addr: u8, _bytes: &[u8]) -> Result<(), Nack> {
        self.reply.map(|_| ()).ok_or(Nack)
    }

    fn read(&mut self, _addr: u8, buffer: &mut [u8]) -> Result<(), Nack> {
        let reply = self.reply.ok_or(Nack)?;
        buffer.copy_from_slice(&reply);
        Ok(())
    }
}

pub type BoardSensors = SensorSuite<FixedAdc, FixedAdc, TempBus>;

pub fn board(light: u16, soil: u16, bus: TempBus) -> BoardSensors {
    SensorSuite::new(
        LightSensor::new(FixedAdc(light)),
        SoilMoistureSensor::new(FixedAdc(soil)),
        TemperatureSensor::new(bus),
    )
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("broker unreachable")]
pub struct Unreachable;

/// Everything a [`RecordingConnector`] was asked to send
#[derive(Debug, Default)]
pub struct SendLog {
    pub attempts: Vec<(String, String)>,
    pub failures_ahead: VecDeque<bool>,
}

/// Connector that records publishes and fails on demand
///
/// Each send pops the next scripted outcome (`true` = fail); once the
/// script is exhausted every send succeeds.
#[derive(Clone, Default)]
pub struct RecordingConnector {
    pub log: Arc<Mutex<SendLog>>,
    stats: ConnectionStats,
}

impl RecordingConnector {
    pub fn failing_first(failures: &[bool]) -> Self {
        let connector = Self::default();
        connector.log.lock().unwrap().failures_ahead = failures.iter().copied().collect();
        connector
    }

    pub fn attempts(&self) -> Vec<(String, String)> {
        self.log.lock().unwrap().attempts.clone()
    }
}

#[async_trait::async_trait]
impl AsyncConnector for RecordingConnector {
    type Error = Unreachable;

    async fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Unreachable> {
        let fail = {
            let mut log = self.log.lock().unwrap();
            log.attempts
                .push((topic.to_string(), String::from_utf8_lossy(data).into_owned()));
            log.failures_ahead.pop_front().unwrap_or(false)
        };
        if fail {
            self.stats.record_failure(&Unreachable);
            Err(Unreachable)
        } else {
            self.stats.record_sent(data.len());
            Ok(())
        }
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn stats(&self) -> ConnectionStats {
        self.stats.clone()
    }
}

/// Link that obtains an address after a fixed number of empty polls
#[derive(Debug)]
pub struct DelayedLink {
    pub empty_polls: u64,
    pub polls: u64,
}

impl DelayedLink {
    pub fn new(empty_polls: u64) -> Self {
        Self { empty_polls, polls: 0 }
    }
}

impl NetworkLink for DelayedLink {
    fn activate(&mut self) {}

    fn associate(&mut self, _credentials: &WifiCredentials) {}

    fn poll_address(&mut self) -> Option<IpAddr> {
        self.polls += 1;
        (self.polls > self.empty_polls).then_some(NODE_ADDRESS)
    }
}
