//! Sensor Specifications and Wiring
//!
//! Values come from the reference board: a 12-bit SAR ADC with 11 dB
//! attenuation, a photoresistor divider fed from the 3.3 V rail, and an
//! LM73-class digital temperature sensor on the shared I2C bus.

// ===== ADC =====

/// Largest code a 12-bit ADC produces.
pub const ADC_MAX_CODE: u16 = 4095;

/// `ADC_MAX_CODE` as a float, used by the conversion formulas.
pub const ADC_FULL_SCALE: f32 = ADC_MAX_CODE as f32;

// ===== PHOTORESISTOR DIVIDER =====

/// Supply voltage across the photoresistor divider (V).
pub const DIVIDER_SUPPLY_VOLTAGE: f32 = 3.3;

/// Fixed resistor of the photoresistor divider (Ω).
pub const DIVIDER_PULLDOWN_OHMS: f32 = 10_000.0;

// ===== SOIL MOISTURE =====

/// Lower bound of the soil moisture scale (%).
pub const SOIL_MOISTURE_MIN_PCT: f32 = 0.0;

/// Upper bound of the soil moisture scale (%).
pub const SOIL_MOISTURE_MAX_PCT: f32 = 100.0;

// ===== TEMPERATURE SENSOR =====

/// 7-bit I2C address of the on-board temperature sensor.
pub const TEMP_SENSOR_I2C_ADDR: u8 = 77;

/// Configuration register pointer.
pub const TEMP_CONFIG_REGISTER: u8 = 0x04;

/// Configuration value written before every read (resolution bits set).
pub const TEMP_CONFIG_VALUE: u8 = 0b0110_0000;

/// Temperature result register pointer.
pub const TEMP_RESULT_REGISTER: u8 = 0x00;

/// Fixed-point divisor of the temperature register (LSB = 1/128 °C).
pub const TEMP_LSB_PER_CELSIUS: f32 = 128.0;
