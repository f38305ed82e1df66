use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use smartfarm_core::constants::ADC_MAX_CODE;
use smartfarm_core::AnalogInput;

/// One IIO channel read through its `in_voltageN_raw` attribute
///
/// The channel is read once when opened, so a wrong path or a missing
/// driver is reported at start-up. Afterwards the ADC contract is
/// infallible: a failed read logs a warning and repeats the last good code.
#[derive(Debug)]
pub struct SysfsAdc {
    path: PathBuf,
    last_code: u16,
}

impl SysfsAdc {
    /// Open the channel, failing unless it yields a code
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let last_code = read_code(&path)?;
        Ok(Self { path, last_code })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the channel once, clamped to the 12-bit range
    pub fn try_read(&self) -> io::Result<u16> {
        read_code(&self.path)
    }
}

fn read_code(path: &Path) -> io::Result<u16> {
    let text = fs::read_to_string(path)?;
    let code: u32 = text
        .trim()
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(code.min(u32::from(ADC_MAX_CODE)) as u16)
}

impl AnalogInput for SysfsAdc {
    fn read_raw(&mut self) -> u16 {
        match self.try_read() {
            Ok(code) => self.last_code = code,
            Err(e) => warn!(
                "ADC read from {} failed: {}; reusing {}",
                self.path.display(),
                e,
                self.last_code
            ),
        }
        self.last_code
    }
}
