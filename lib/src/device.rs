use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Driver layer a backlight interface is exposed by, as reported in its
/// `type` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Driven directly by the graphics hardware
    Raw,
    /// Generic platform interface
    Platform,
    /// Vendor firmware interface, typically ACPI
    Firmware,
    /// Anything else, including a missing attribute
    Other,
}

impl DeviceType {
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr {
            Some("raw") => Self::Raw,
            Some("platform") => Self::Platform,
            Some("firmware") => Self::Firmware,
            _ => Self::Other,
        }
    }

    /// Selection rank, lower is preferred.
    pub fn priority(self) -> u8 {
        match self {
            Self::Raw => 0,
            Self::Other => 1,
            Self::Platform => 2,
            Self::Firmware => 3,
        }
    }
}

/// A resolved backlight device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacklightDevice {
    base_path: PathBuf,
    device_type: Option<String>,
}

impl BacklightDevice {
    pub fn new(base_path: impl Into<PathBuf>, device_type: Option<String>) -> Self {
        Self {
            base_path: base_path.into(),
            device_type,
        }
    }

    /// Directory holding the device's attribute files.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// The `type` attribute exactly as the device reported it.
    pub fn device_type(&self) -> Option<&str> {
        self.device_type.as_deref()
    }

    pub fn kind(&self) -> DeviceType {
        DeviceType::from_attr(self.device_type())
    }

    pub fn name(&self) -> Cow<'_, str> {
        self.base_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    }
}
