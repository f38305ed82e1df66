//! Common test peripherals for integration tests
//!
//! This module provides:
//! - A scripted ADC that replays a sequence of codes
//! - An I2C bus that records traffic and can be told to fail
//! - Ready-made sensor suites for the reference board

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use smartfarm_core::{
    AnalogInput, I2cBus, LightSensor, SensorSuite, SoilMoistureSensor, TemperatureSensor,
};

/// ADC channel replaying scripted codes; repeats the last one when drained
pub struct ScriptedAdc {
    codes: VecDeque<u16>,
    last: u16,
}

impl ScriptedAdc {
    pub fn constant(code: u16) -> Self {
        Self::sequence(&[code])
    }

    pub fn sequence(codes: &[u16]) -> Self {
        Self {
            codes: codes.iter().copied().collect(),
            last: codes.last().copied().unwrap_or(0),
        }
    }
}

impl AnalogInput for ScriptedAdc {
    fn read_raw(&mut self) -> u16 {
        self.codes.pop_front().unwrap_or(self.last)
    }
}

/// Failure the fake bus reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusFault {
    Nack,
    Timeout,
}

/// Traffic seen by the fake bus
#[derive(Debug, Default)]
pub struct BusLog {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub reads: Vec<u8>,
}

/// I2C bus answering every read with a fixed register pair
#[derive(Clone)]
pub struct FakeBus {
    pub response: [u8; 2],
    pub fault: Option<BusFault>,
    pub log: Rc<RefCell<BusLog>>,
}

impl FakeBus {
    pub fn responding(high: u8, low: u8) -> Self {
        Self {
            response: [high, low],
            fault: None,
            log: Rc::new(RefCell::new(BusLog::default())),
        }
    }

    pub fn failing(fault: BusFault) -> Self {
        Self {
            fault: Some(fault),
            ..Self::responding(0, 0)
        }
    }
}

impl I2cBus for FakeBus {
    type Error = BusFault;

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), BusFault> {
        self.log.borrow_mut().writes.push((addr, bytes.to_vec()));
        match self.fault {
            Some(BusFault::Nack) => Err(BusFault::Nack),
            _ => Ok(()),
        }
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), BusFault> {
        self.log.borrow_mut().reads.push(addr);
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        buffer.copy_from_slice(&self.response);
        Ok(())
    }
}

pub type TestSuite = SensorSuite<ScriptedAdc, ScriptedAdc, FakeBus>;

/// Reference board with fixed ADC codes and a working temperature sensor
pub fn suite(light_code: u16, soil_code: u16, bus: FakeBus) -> TestSuite {
    SensorSuite::new(
        LightSensor::new(ScriptedAdc::constant(light_code)),
        SoilMoistureSensor::new(ScriptedAdc::constant(soil_code)),
        TemperatureSensor::new(bus),
    )
}
