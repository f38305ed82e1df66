use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use log::debug;
use smartfarm_core::I2cBus;

/// `ioctl` request selecting the target address (linux/i2c-dev.h)
const I2C_SLAVE: u16 = 0x0703;

/// I2C master backed by a `/dev/i2c-N` character device
///
/// The device is opened on first use and reopened after an I/O error, so
/// a bus that appears late (module loaded after boot) is picked up.
#[derive(Debug)]
pub struct LinuxI2c {
    path: PathBuf,
    device: Option<File>,
    selected: Option<u8>,
}

impl LinuxI2c {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            device: None,
            selected: None,
        }
    }

    fn select(&mut self, addr: u8) -> io::Result<&mut File> {
        if self.device.is_none() {
            debug!("Opening I2C bus {}", self.path.display());
            let file = OpenOptions::new().read(true).write(true).open(&self.path)?;
            self.device = Some(file);
            self.selected = None;
        }
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "I2C bus closed"))?;

        if self.selected != Some(addr) {
            set_slave_address(device, addr)?;
            self.selected = Some(addr);
        }
        Ok(device)
    }

    fn transfer<T>(&mut self, addr: u8, op: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let result = self.select(addr).and_then(op);
        if result.is_err() {
            self.device = None;
            self.selected = None;
        }
        result
    }
}

#[allow(unsafe_code)]
fn set_slave_address(device: &File, addr: u8) -> io::Result<()> {
    // SAFETY: valid open fd; I2C_SLAVE takes the address by value
    let rc = unsafe { libc::ioctl(device.as_raw_fd(), I2C_SLAVE.into(), libc::c_ulong::from(addr)) };
    if rc < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

impl I2cBus for LinuxI2c {
    type Error = io::Error;

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.transfer(addr, |device| device.write_all(bytes))
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.transfer(addr, |device| device.read_exact(buffer))
    }
}
