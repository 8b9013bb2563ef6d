use regex::Regex;

use crate::consts::*;
use crate::device::{BacklightDevice, DeviceType};
use crate::errors::*;
use crate::registry::{DeviceRecord, DeviceRegistry};

make_log_macro!(debug, "enumerator");
make_log_macro!(info, "enumerator");
make_log_macro!(error, "enumerator");

/// Picks the preferred backlight device out of everything the registry
/// knows about.
///
/// Devices are ranked by [`DeviceType::priority`]: raw interfaces first,
/// then unclassified ones, then platform and finally firmware interfaces.
/// Devices of equal rank keep the order the registry listed them in.
pub struct DeviceEnumerator<R> {
    registry: R,
    device_regex: Option<Regex>,
}

impl<R: DeviceRegistry> DeviceEnumerator<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            device_regex: None,
        }
    }

    /// Only consider devices whose directory name matches `device_regex`.
    pub fn with_device_filter(mut self, device_regex: Regex) -> Self {
        self.device_regex = Some(device_regex);
        self
    }

    /// Every matching backlight device, most preferred first.
    pub fn candidates(&self) -> Result<Vec<BacklightDevice>> {
        let mut devices: Vec<BacklightDevice> = self
            .registry
            .query_by_subsystem(SUBSYSTEM_BACKLIGHT)?
            .iter()
            .map(|record| {
                BacklightDevice::new(record.sysfs_path(), record.sysfs_attr(ATTR_TYPE))
            })
            .filter(|device| match &self.device_regex {
                Some(regex) if !regex.is_match(&device.name()) => {
                    debug!("{:?} did not match {}", device.name(), regex.as_str());
                    false
                }
                _ => true,
            })
            .collect();

        // stable, ties keep registry order
        devices.sort_by_key(|device| device.kind().priority());
        Ok(devices)
    }

    pub fn resolve_best_device(&self) -> Result<BacklightDevice> {
        let candidates = self.candidates().inspect_err(|e| {
            error!("Could not query {SUBSYSTEM_BACKLIGHT} devices: {e}");
        })?;
        match candidates.into_iter().next() {
            Some(device) => {
                info!("Found device at {}", device.base_path().display());
                if device.kind() == DeviceType::Other {
                    debug!("unclassified type {:?}", device.device_type());
                }
                Ok(device)
            }
            None => {
                error!("No devices were found.");
                Err(BacklightError::NotFound)
            }
        }
    }
}
