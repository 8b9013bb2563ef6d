#![warn(clippy::match_same_arms)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::unnecessary_wraps)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod util;
mod config;
mod consts;
mod controller;
mod device;
mod enumerator;
mod errors;
pub mod registry;

use regex::Regex;

pub use crate::config::{BacklightConfig, RegistryKind};
pub use crate::controller::BrightnessController;
pub use crate::device::{BacklightDevice, DeviceType};
pub use crate::enumerator::DeviceEnumerator;
pub use crate::errors::{AttributeError, BacklightError, Result};
#[cfg(feature = "udev")]
use crate::registry::UdevRegistry;
use crate::registry::{DeviceRegistry, SysfsRegistry};

make_log_macro!(debug, "sugar_backlight");
make_log_macro!(error, "sugar_backlight");

/// Used to construct a [`BrightnessController`] for the preferred device.
#[derive(Default)]
pub struct BacklightBuilder<'a> {
    device_regex: Option<&'a str>,
    config: Option<BacklightConfig>,
    registry: Option<RegistryKind>,
}

impl<'a> BacklightBuilder<'a> {
    /// Create a new [`BacklightBuilder`].
    pub fn new() -> Self {
        BacklightBuilder::default()
    }

    /// Defaults to the `device` value of the config.
    pub fn with_device_regex(mut self, device_regex: &'a str) -> Self {
        self.device_regex = Some(device_regex);
        self
    }

    /// Defaults to [`BacklightConfig::new()`].
    pub fn with_config(mut self, config: BacklightConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Defaults to the `registry` value of the config.
    pub fn with_registry(mut self, registry: RegistryKind) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Resolve the preferred device and bind a controller to it.
    pub fn build(self) -> Result<BrightnessController> {
        let config = match self.config {
            Some(config) => config,
            None => BacklightConfig::new().inspect_err(|e| {
                error!("{e}");
            })?,
        };
        let device_regex = Regex::new(self.device_regex.unwrap_or(config.device.as_str()))
            .inspect_err(|e| {
                error!("Invalid device regex: {e}");
            })?;
        debug!("device filter {}", device_regex.as_str());

        let device = match self.registry.unwrap_or(config.registry) {
            RegistryKind::Sysfs => {
                resolve(SysfsRegistry::new(&config.sysfs_class_path), device_regex)?
            }
            #[cfg(feature = "udev")]
            RegistryKind::Udev => resolve(UdevRegistry, device_regex)?,
        };

        Ok(BrightnessController::new(device))
    }
}

fn resolve<R: DeviceRegistry>(registry: R, device_regex: Regex) -> Result<BacklightDevice> {
    DeviceEnumerator::new(registry)
        .with_device_filter(device_regex)
        .resolve_best_device()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::Path;

    fn add_device(class_path: &Path, name: &str, device_type: &str, max_brightness: u32) {
        let device_dir = class_path.join("backlight").join(name);
        fs::create_dir_all(&device_dir).unwrap();
        fs::write(device_dir.join("type"), format!("{device_type}\n")).unwrap();
        fs::write(device_dir.join("brightness"), "0\n").unwrap();
        fs::write(device_dir.join("max_brightness"), format!("{max_brightness}\n")).unwrap();
    }

    fn config(class_path: &Path) -> BacklightConfig {
        BacklightConfig {
            sysfs_class_path: class_path.to_path_buf(),
            ..BacklightConfig::default()
        }
    }

    #[test]
    fn builds_controller_for_preferred_device() {
        let dir = tempfile::tempdir().unwrap();
        add_device(dir.path(), "acpi_video0", "firmware", 15);
        add_device(dir.path(), "intel_backlight", "raw", 4882);

        let controller = BacklightBuilder::new()
            .with_config(config(dir.path()))
            .build()
            .unwrap();

        assert_eq!(controller.device().name(), "intel_backlight");
        assert_eq!(controller.get_max_brightness().unwrap(), 4882);
        controller.set_brightness(0).unwrap();
        assert_eq!(controller.get_brightness().unwrap(), 1);
    }

    #[test]
    fn regex_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        add_device(dir.path(), "acpi_video0", "firmware", 15);
        add_device(dir.path(), "intel_backlight", "raw", 4882);

        let controller = BacklightBuilder::new()
            .with_config(BacklightConfig {
                device: "intel".into(),
                ..config(dir.path())
            })
            .with_device_regex("acpi")
            .build()
            .unwrap();

        assert_eq!(controller.device().kind(), DeviceType::Firmware);
    }

    #[test]
    fn no_devices() {
        let dir = tempfile::tempdir().unwrap();

        let result = BacklightBuilder::new()
            .with_config(config(dir.path()))
            .build();

        assert!(matches!(result, Err(BacklightError::NotFound)));
    }

    #[cfg(feature = "udev")]
    #[test]
    fn udev_registry_reaches_enumerator() {
        let dir = tempfile::tempdir().unwrap();

        let result = BacklightBuilder::new()
            .with_config(config(dir.path()))
            .with_registry(RegistryKind::Udev)
            .with_device_regex("a^")
            .build();
        assert!(matches!(result, Err(BacklightError::NotFound)));
    }

    #[test]
    fn invalid_regex() {
        let dir = tempfile::tempdir().unwrap();

        let result = BacklightBuilder::new()
            .with_config(config(dir.path()))
            .with_device_regex("[")
            .build();

        assert!(matches!(result, Err(BacklightError::InvalidRegex(_))));
    }
}
