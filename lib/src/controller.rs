use std::cmp::max;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::consts::*;
use crate::device::{BacklightDevice, DeviceType};
use crate::errors::*;
use crate::util::*;

make_log_macro!(debug, "controller");
make_log_macro!(error, "controller");

/// Reads and writes the brightness of a single resolved device.
#[derive(Clone, Debug)]
pub struct BrightnessController {
    device: BacklightDevice,
}

impl BrightnessController {
    pub fn new(device: BacklightDevice) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &BacklightDevice {
        &self.device
    }

    fn attribute_path(&self, file: &str) -> PathBuf {
        self.device.base_path().join(file)
    }

    fn read_attribute(&self, file: &str) -> Result<u32> {
        let path = self.attribute_path(file);
        read_integer(&path).map_err(|source| {
            error!("Could not read from {}: {source}", path.display());
            BacklightError::Read { path, source }
        })
    }

    /// Current raw brightness level.
    pub fn get_brightness(&self) -> Result<u32> {
        self.read_attribute(FILE_BRIGHTNESS)
    }

    /// Highest raw brightness level the device accepts.
    pub fn get_max_brightness(&self) -> Result<u32> {
        self.read_attribute(FILE_MAX_BRIGHTNESS)
    }

    /// Lowest level this controller will write given the device's maximum.
    ///
    /// Fine grained raw devices may go blank for good at zero, so they are
    /// kept at one. Everything else can be turned fully off.
    pub fn minimum_brightness(&self, max_brightness: u32) -> u32 {
        match self.device.kind() {
            DeviceType::Raw if max_brightness > RAW_FINE_GRAINED_ABOVE => 1,
            _ => 0,
        }
    }

    /// Write `requested`, raised to [`Self::minimum_brightness`] if needed.
    ///
    /// Requests below zero are written as zero, or as the minimum when that is
    /// higher. Nothing is written when the device maximum cannot be read or
    /// is zero.
    pub fn set_brightness(&self, requested: i64) -> Result<()> {
        let max_brightness = match self.get_max_brightness() {
            Ok(max_brightness) if max_brightness > 0 => max_brightness,
            result => {
                error!(
                    "Could not get maximum value for {}",
                    self.device.base_path().display()
                );
                let source = match result {
                    Err(BacklightError::Read { source, .. }) => Some(source),
                    _ => None,
                };
                return Err(BacklightError::Precondition {
                    path: self.device.base_path().to_path_buf(),
                    source,
                });
            }
        };

        let minimum = i64::from(self.minimum_brightness(max_brightness));
        let value = max(minimum, requested).max(0);
        let path = self.attribute_path(FILE_BRIGHTNESS);
        debug!("writing {value} to {}", path.display());

        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .and_then(|mut file| file.write_all(value.to_string().as_bytes()))
            .map_err(|source| {
                error!("Could not write {value} to {}.", path.display());
                BacklightError::Write {
                    value,
                    path,
                    source,
                }
            })
    }
}
