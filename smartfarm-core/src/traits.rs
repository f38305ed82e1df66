//! Peripheral traits for the sensor interface
//!
//! Sensors only see these traits, never a HAL type. Board support code
//! (ESP32, RP2040, Linux sysfs) implements them once per platform; tests
//! implement them with scripted values.
//! Keep them simple - a sensor node doesn't need complex abstractions.

/// Single-channel analog input
///
/// Reading an ADC channel cannot fail on the supported boards, so the read is
/// infallible. Implementations return the raw code, nominally in
/// `[0, ADC_MAX_CODE]`; callers clamp anything above.
pub trait AnalogInput {
    /// Take one conversion
    fn read_raw(&mut self) -> u16;
}

/// Byte-oriented I2C bus master
///
/// # Safety Invariants
///
/// - Only one owner per bus instance
/// - Address must be 7-bit (valid range: 0x00..=0x7F)
pub trait I2cBus {
    /// Bus-level failure (NACK, timeout, arbitration loss, I/O error)
    type Error: core::fmt::Debug;

    /// START - ADDR(W) - DATA - STOP
    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// START - ADDR(R) - DATA - STOP
    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn read_raw(&mut self) -> u16 {
        (**self).read_raw()
    }
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(addr, bytes)
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(addr, buffer)
    }
}
