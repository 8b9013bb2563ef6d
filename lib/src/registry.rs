//! Access to the kernel's device registry.
//!
//! The enumerator only needs to list the devices of one subsystem and to
//! look up single attributes on them, so that is all [`DeviceRegistry`]
//! exposes. [`SysfsRegistry`] walks `/sys/class` directly; with the `udev`
//! feature [`UdevRegistry`] asks libudev instead.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::consts::*;
use crate::errors::*;
use crate::util::*;

make_log_macro!(debug, "registry");

/// One device as reported by a [`DeviceRegistry`].
pub trait DeviceRecord {
    /// Directory holding the device's attribute files.
    fn sysfs_path(&self) -> &Path;

    /// Value of the attribute `name`, if the device has a readable one.
    fn sysfs_attr(&self, name: &str) -> Option<String>;
}

pub trait DeviceRegistry {
    type Record: DeviceRecord;

    /// All devices registered under `subsystem`, in enumeration order.
    fn query_by_subsystem(&self, subsystem: &str) -> Result<Vec<Self::Record>>;
}

/// Registry backed by the class directories under `/sys/class`.
#[derive(Clone, Debug)]
pub struct SysfsRegistry {
    class_path: PathBuf,
}

impl Default for SysfsRegistry {
    fn default() -> Self {
        Self::new(SYSFS_CLASS_PATH)
    }
}

impl SysfsRegistry {
    pub fn new(class_path: impl Into<PathBuf>) -> Self {
        Self {
            class_path: class_path.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SysfsRecord {
    path: PathBuf,
}

impl DeviceRecord for SysfsRecord {
    fn sysfs_path(&self) -> &Path {
        &self.path
    }

    fn sysfs_attr(&self, name: &str) -> Option<String> {
        read_file(self.path.join(name)).ok()
    }
}

impl DeviceRegistry for SysfsRegistry {
    type Record = SysfsRecord;

    fn query_by_subsystem(&self, subsystem: &str) -> Result<Vec<SysfsRecord>> {
        let subsystem_path = self.class_path.join(subsystem);
        let entries = match fs::read_dir(&subsystem_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist", subsystem_path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for entry in entries {
            let link = entry?.path();
            // Class entries are symlinks into /sys/devices
            let path = fs::canonicalize(&link).unwrap_or(link);
            debug!("{}", path.display());
            records.push(SysfsRecord { path });
        }
        records.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(records)
    }
}

#[cfg(feature = "udev")]
#[cfg_attr(docsrs, doc(cfg(feature = "udev")))]
pub use self::udev_registry::{UdevRecord, UdevRegistry};

#[cfg(feature = "udev")]
mod udev_registry {
    use super::*;

    /// Registry backed by libudev's device enumeration.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct UdevRegistry;

    pub struct UdevRecord {
        path: PathBuf,
        device: udev::Device,
    }

    impl DeviceRecord for UdevRecord {
        fn sysfs_path(&self) -> &Path {
            &self.path
        }

        fn sysfs_attr(&self, name: &str) -> Option<String> {
            self.device
                .attribute_value(name)
                .map(|value| value.to_string_lossy().trim_end().to_string())
        }
    }

    impl DeviceRegistry for UdevRegistry {
        type Record = UdevRecord;

        fn query_by_subsystem(&self, subsystem: &str) -> Result<Vec<UdevRecord>> {
            let mut enumerator = udev::Enumerator::new()?;
            enumerator.match_subsystem(subsystem)?;

            Ok(enumerator
                .scan_devices()?
                .map(|device| UdevRecord {
                    path: device.syspath().to_path_buf(),
                    device,
                })
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::os::unix::fs::symlink;

    fn add_device(root: &Path, name: &str, device_type: Option<&str>) -> PathBuf {
        let device_dir = root.join("devices").join(name);
        fs::create_dir_all(&device_dir).unwrap();
        if let Some(device_type) = device_type {
            fs::write(device_dir.join(ATTR_TYPE), format!("{device_type}\n")).unwrap();
        }
        let class_dir = root.join("class").join(SUBSYSTEM_BACKLIGHT);
        fs::create_dir_all(&class_dir).unwrap();
        symlink(&device_dir, class_dir.join(name)).unwrap();
        fs::canonicalize(device_dir).unwrap()
    }

    #[test]
    fn missing_subsystem_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = SysfsRegistry::new(dir.path());

        assert!(
            registry
                .query_by_subsystem(SUBSYSTEM_BACKLIGHT)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn records_resolve_links_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        let video = add_device(dir.path(), "intel_backlight", Some("raw"));
        let acpi = add_device(dir.path(), "acpi_video0", Some("firmware"));

        let registry = SysfsRegistry::new(dir.path().join("class"));
        let records = registry.query_by_subsystem(SUBSYSTEM_BACKLIGHT).unwrap();

        let paths: Vec<&Path> = records.iter().map(|r| r.sysfs_path()).collect();
        assert_eq!(paths, vec![acpi.as_path(), video.as_path()]);
        assert_eq!(records[0].sysfs_attr(ATTR_TYPE).as_deref(), Some("firmware"));
        assert_eq!(records[1].sysfs_attr(ATTR_TYPE).as_deref(), Some("raw"));
    }

    #[cfg(feature = "udev")]
    #[test]
    fn udev_records_are_absolute() {
        let records = UdevRegistry.query_by_subsystem(SUBSYSTEM_BACKLIGHT).unwrap();
        for record in records {
            assert!(record.sysfs_path().is_absolute());
        }
    }

    #[test]
    fn absent_attribute_is_none() {
        let dir = tempfile::tempdir().unwrap();
        add_device(dir.path(), "panel", None);

        let registry = SysfsRegistry::new(dir.path().join("class"));
        let records = registry.query_by_subsystem(SUBSYSTEM_BACKLIGHT).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sysfs_attr(ATTR_TYPE), None);
    }
}
