use crate::consts::*;
use crate::errors::*;
use crate::util::*;

use std::path::PathBuf;

use regex::Regex;
use serde::Deserialize;
use serde::Deserializer;
use smart_default::SmartDefault;

make_log_macro!(debug, "config");

#[derive(Deserialize, Clone, Debug, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct BacklightConfig {
    /// Only devices whose name matches this regular expression are considered
    #[default(DEFAULT_DEVICE_REGEX.to_string())]
    #[serde(deserialize_with = "deserialize_device_regex")]
    pub device: String,

    /// Where the kernel's device class directories live
    #[default(PathBuf::from(SYSFS_CLASS_PATH))]
    pub sysfs_class_path: PathBuf,

    /// How backlight devices are enumerated
    pub registry: RegistryKind,
}

/// Source of the backlight device list.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// Walk `sysfs_class_path` directly
    #[default]
    Sysfs,
    /// Ask libudev
    #[cfg(feature = "udev")]
    #[cfg_attr(docsrs, doc(cfg(feature = "udev")))]
    Udev,
}

fn deserialize_device_regex<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let device: String = Deserialize::deserialize(deserializer)?;
    debug!("{:?}", device);

    if let Err(e) = Regex::new(&device) {
        return Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Str(&device),
            &format!("a valid regular expression ({e})").as_str(),
        ));
    }

    Ok(device)
}

impl BacklightConfig {
    /// Load the user's `config.toml`, falling back to defaults when there is none.
    pub fn new() -> Result<Self> {
        if let Some(config_path) = find_file("config", None, Some("toml")) {
            debug!("loading {}", config_path.display());
            deserialize_toml_file(config_path)
        } else {
            debug!("using default config");
            Ok(BacklightConfig::default())
        }
    }
}
