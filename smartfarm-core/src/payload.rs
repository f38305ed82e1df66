//! Telemetry payload and its wire format
//!
//! One payload per sampling cycle, built from a [`SampleSet`] and the fixed
//! location of the node. On the wire it is compact JSON:
//!
//! ```text
//! {"lux":9.99,"soil_moisture":41.27,"temperature":30.0,"latitude":13.8657,"longitude":100.462}
//! ```
//!
//! Soil moisture and temperature are rounded to two decimals; lux is sent
//! with full precision. A reading that is unavailable is sent as the string
//! `"N/A"` in place of the number, which is what the ingestion service
//! expects.

use crate::sensors::{Reading, SampleSet};

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

#[cfg(feature = "std")]
use crate::errors::PayloadError;

/// Wire marker for a sensor that could not be read
pub const UNAVAILABLE_MARKER: &str = "N/A";

/// Fixed position of the node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    /// Decimal degrees, north positive
    pub latitude: f64,
    /// Decimal degrees, east positive
    pub longitude: f64,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            latitude: crate::constants::DEFAULT_LATITUDE,
            longitude: crate::constants::DEFAULT_LONGITUDE,
        }
    }
}

/// One telemetry record, immutable once built
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Payload {
    lux: Reading,
    #[cfg_attr(feature = "serde", serde(rename = "soil_moisture"))]
    soil_moisture_pct: f32,
    #[cfg_attr(feature = "serde", serde(rename = "temperature"))]
    temperature_c: Reading,
    latitude: f64,
    longitude: f64,
}

impl Payload {
    /// Build the payload of one cycle
    pub fn new(samples: SampleSet, location: Location) -> Self {
        Self {
            lux: samples.lux,
            soil_moisture_pct: round_to_hundredths(samples.soil_moisture_pct),
            temperature_c: samples.temperature_c.map(round_to_hundredths),
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }

    /// Illuminance in lux
    pub fn lux(&self) -> Reading {
        self.lux
    }

    /// Soil moisture in percent, two decimals
    pub fn soil_moisture_pct(&self) -> f32 {
        self.soil_moisture_pct
    }

    /// Temperature in °C, two decimals
    pub fn temperature_c(&self) -> Reading {
        self.temperature_c
    }

    /// Node position
    pub fn location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Compact JSON encoding sent to the broker
    #[cfg(feature = "std")]
    pub fn to_json(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn round_to_hundredths(value: f32) -> f32 {
    libm::roundf(value * 100.0) / 100.0
}

#[cfg(feature = "serde")]
impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v) => serializer.serialize_f32(*v),
            Reading::Unavailable => serializer.serialize_str(UNAVAILABLE_MARKER),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    fn samples(lux: Reading, soil: f32, temp: Reading) -> SampleSet {
        SampleSet {
            lux,
            soil_moisture_pct: soil,
            temperature_c: temp,
        }
    }

    #[test]
    fn rounds_soil_and_temperature() {
        let payload = Payload::new(
            samples(Reading::Value(12.3456), 41.2749, Reading::Value(29.996)),
            Location::default(),
        );

        assert_eq!(payload.soil_moisture_pct(), 41.27);
        assert_eq!(payload.temperature_c(), Reading::Value(30.0));
        assert_eq!(payload.lux(), Reading::Value(12.3456));
    }

    #[test]
    fn json_field_names_and_values() {
        let payload = Payload::new(
            samples(Reading::Value(10.0), 100.0, Reading::Value(30.0)),
            Location::default(),
        );
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(json["lux"], 10.0);
        assert_eq!(json["soil_moisture"], 100.0);
        assert_eq!(json["temperature"], 30.0);
        assert_eq!(json["latitude"], 13.8657);
        assert_eq!(json["longitude"], 100.462);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn unavailable_readings_use_marker() {
        let payload = Payload::new(
            samples(Reading::Unavailable, 0.0, Reading::Unavailable),
            Location { latitude: 1.5, longitude: -2.25 },
        );
        let text = payload.to_json().unwrap();

        assert!(text.contains(r#""temperature":"N/A""#), "{text}");
        assert!(text.contains(r#""lux":"N/A""#), "{text}");
        assert!(text.contains(r#""soil_moisture":0.0"#), "{text}");
    }
}
