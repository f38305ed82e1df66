//! Linux peripherals for the node
//!
//! Adapters from Linux kernel interfaces to the traits the sensor and
//! network layers are written against:
//!
//! - IIO sysfs ADC channels -> [`AnalogInput`](smartfarm_core::AnalogInput)
//! - `/dev/i2c-*` character devices -> [`I2cBus`](smartfarm_core::I2cBus)
//! - NetworkManager (`nmcli`) -> [`NetworkLink`](smartfarm_connectors::NetworkLink)
//!
//! ADC channels are read once when opened so a wrong path fails start-up.
//! The I2C bus and the Wi-Fi link are only touched when used, and a missing
//! temperature sensor degrades its reading instead of stopping the node.

mod linux_i2c;
mod nmcli;
mod sysfs_adc;

pub use linux_i2c::LinuxI2c;
pub use nmcli::NmcliLink;
pub use sysfs_adc::SysfsAdc;

use std::path::Path;

use smartfarm_core::{LightSensor, SensorSuite, SoilMoistureSensor, TemperatureSensor};

use crate::config::{ConfigError, NodeConfig};

/// Sensor suite wired to Linux peripherals
pub type NodeSensors = SensorSuite<SysfsAdc, SysfsAdc, LinuxI2c>;

/// Wire up the three sensors described by `config`
///
/// Both ADC channels must be readable now; a node that cannot see its
/// analog sensors would otherwise publish invented values. The I2C bus is
/// opened lazily and only blanks the temperature when missing.
pub fn sensors_from_config(config: &NodeConfig) -> Result<NodeSensors, ConfigError> {
    let light = open_adc("LIGHT_ADC_PATH", &config.light_adc_path)?;
    let soil = open_adc("SOIL_ADC_PATH", &config.soil_adc_path)?;

    Ok(SensorSuite::new(
        LightSensor::new(light),
        SoilMoistureSensor::new(soil),
        TemperatureSensor::with_address(LinuxI2c::new(&config.i2c_bus), config.temp_sensor_addr),
    ))
}

fn open_adc(name: &'static str, path: &Path) -> Result<SysfsAdc, ConfigError> {
    SysfsAdc::open(path).map_err(|e| ConfigError::AdcChannel {
        name,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
