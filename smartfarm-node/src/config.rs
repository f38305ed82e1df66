//! Node configuration
//!
//! Everything deployment-specific comes from the environment so one binary
//! serves every field. Only `WIFI_SSID` and `MQTT_BROKER` are required; the
//! rest defaults to the reference deployment.
//!
//! | Variable             | Default                                     |
//! |----------------------|---------------------------------------------|
//! | `WIFI_SSID`          | required                                    |
//! | `WIFI_PASSWORD`      | empty (open network)                        |
//! | `WIFI_INTERFACE`     | `wlan0`                                     |
//! | `MQTT_BROKER`        | required, `host` or `host:port`             |
//! | `MQTT_USER`          | none                                        |
//! | `MQTT_PASSWORD`      | empty, only used with `MQTT_USER`           |
//! | `MQTT_CLIENT_ID`     | `smartfarm-node`                            |
//! | `MQTT_TOPIC`         | `b6610545901/smartfarm`                     |
//! | `SAMPLE_PERIOD_SECS` | 1800                                        |
//! | `NETWORK_POLL_MS`    | 1000                                        |
//! | `LIGHT_ADC_PATH`     | `/sys/bus/iio/devices/iio:device0/in_voltage6_raw` |
//! | `SOIL_ADC_PATH`      | `/sys/bus/iio/devices/iio:device0/in_voltage5_raw` |
//! | `I2C_BUS`            | `/dev/i2c-1`                                |
//! | `TEMP_SENSOR_ADDR`   | 77 (decimal or `0x` hex)                    |
//! | `LATITUDE`           | 13.8657                                     |
//! | `LONGITUDE`          | 100.462                                     |

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use smartfarm_connectors::mqtt::DEFAULT_PORT;
use smartfarm_connectors::{CredentialsError, MqttConfig, WifiCredentials};
use smartfarm_core::constants::{
    DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_SAMPLE_PERIOD_SECS, DEFAULT_TOPIC,
    NETWORK_POLL_INTERVAL_MS, TEMP_SENSOR_I2C_ADDR,
};
use smartfarm_core::Location;
use thiserror::Error;

pub const DEFAULT_CLIENT_ID: &str = "smartfarm-node";
pub const DEFAULT_INTERFACE: &str = "wlan0";
pub const DEFAULT_LIGHT_ADC_PATH: &str = "/sys/bus/iio/devices/iio:device0/in_voltage6_raw";
pub const DEFAULT_SOIL_ADC_PATH: &str = "/sys/bus/iio/devices/iio:device0/in_voltage5_raw";
pub const DEFAULT_I2C_BUS: &str = "/dev/i2c-1";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name}={value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Wi-Fi credentials: {0}")]
    Credentials(#[from] CredentialsError),

    #[error("{name}={path:?} is not a readable ADC channel: {reason}")]
    AdcChannel {
        name: &'static str,
        path: PathBuf,
        reason: String,
    },
}

/// Full runtime configuration of one node
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub wifi: WifiCredentials,
    pub wifi_interface: String,
    pub mqtt: MqttConfig,
    pub topic: String,
    pub sample_period: Duration,
    pub network_poll_interval: Duration,
    pub light_adc_path: PathBuf,
    pub soil_adc_path: PathBuf,
    pub i2c_bus: PathBuf,
    pub temp_sensor_addr: u8,
    pub location: Location,
}

impl NodeConfig {
    /// Read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name -> value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let ssid = require("WIFI_SSID")?;
        // Passwords are taken verbatim; spaces are valid characters
        let password = lookup("WIFI_PASSWORD").unwrap_or_default();
        let wifi = WifiCredentials::new(&ssid, &password)?;

        let broker = require("MQTT_BROKER")?;
        let (host, port) = parse_broker(&broker)?;
        let client_id = get("MQTT_CLIENT_ID").unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());
        let mut mqtt = MqttConfig::new(client_id, host, port);
        if let Some(user) = get("MQTT_USER") {
            mqtt = mqtt.with_credentials(user, lookup("MQTT_PASSWORD").unwrap_or_default());
        }

        let sample_secs: u64 = parse_or(&get, "SAMPLE_PERIOD_SECS", DEFAULT_SAMPLE_PERIOD_SECS)?;
        let poll_ms: u64 = parse_or(&get, "NETWORK_POLL_MS", NETWORK_POLL_INTERVAL_MS)?;
        let sample_period = positive_duration("SAMPLE_PERIOD_SECS", Duration::from_secs(sample_secs))?;
        let network_poll_interval = positive_duration("NETWORK_POLL_MS", Duration::from_millis(poll_ms))?;

        let temp_sensor_addr = match get("TEMP_SENSOR_ADDR") {
            Some(value) => parse_i2c_address(&value)?,
            None => TEMP_SENSOR_I2C_ADDR,
        };

        let location = Location {
            latitude: parse_or(&get, "LATITUDE", DEFAULT_LATITUDE)?,
            longitude: parse_or(&get, "LONGITUDE", DEFAULT_LONGITUDE)?,
        };

        Ok(Self {
            wifi,
            wifi_interface: get("WIFI_INTERFACE").unwrap_or_else(|| DEFAULT_INTERFACE.to_string()),
            mqtt,
            topic: get("MQTT_TOPIC").unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            sample_period,
            network_poll_interval,
            light_adc_path: get("LIGHT_ADC_PATH").unwrap_or_else(|| DEFAULT_LIGHT_ADC_PATH.into()).into(),
            soil_adc_path: get("SOIL_ADC_PATH").unwrap_or_else(|| DEFAULT_SOIL_ADC_PATH.into()).into(),
            i2c_bus: get("I2C_BUS").unwrap_or_else(|| DEFAULT_I2C_BUS.into()).into(),
            temp_sensor_addr,
            location,
        })
    }
}

fn invalid(name: &'static str, value: &str, reason: impl Display) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match get(name) {
        Some(value) => value.trim().parse().map_err(|e| invalid(name, &value, e)),
        None => Ok(default),
    }
}

fn positive_duration(name: &'static str, duration: Duration) -> Result<Duration, ConfigError> {
    if duration.is_zero() {
        Err(invalid(name, "0", "must be positive"))
    } else {
        Ok(duration)
    }
}

/// `host`, `host:port`, `[v6]:port` or a bare IPv6 address
fn parse_broker(value: &str) -> Result<(String, u16), ConfigError> {
    let value = value.trim();
    let (host, port) = match value.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') || host.starts_with('[') => {
            let port = port.parse().map_err(|e| invalid("MQTT_BROKER", value, e))?;
            (host.trim_start_matches('[').trim_end_matches(']'), port)
        }
        _ => (value, DEFAULT_PORT),
    };
    if host.is_empty() {
        return Err(invalid("MQTT_BROKER", value, "missing host"));
    }
    Ok((host.to_string(), port))
}

fn parse_i2c_address(value: &str) -> Result<u8, ConfigError> {
    let trimmed = value.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => trimmed.parse(),
    }
    .map_err(|e| invalid("TEMP_SENSOR_ADDR", value, e))?;

    if parsed > 0x7F {
        return Err(invalid("TEMP_SENSOR_ADDR", value, "not a 7-bit address"));
    }
    Ok(parsed)
}
