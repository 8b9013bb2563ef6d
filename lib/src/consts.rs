/// Root of the kernel's device class directories
pub const SYSFS_CLASS_PATH: &str = "/sys/class";

/// Subsystem backlight devices are registered under
pub const SUBSYSTEM_BACKLIGHT: &str = "backlight";

/// Filename for device's max brightness
pub const FILE_MAX_BRIGHTNESS: &str = "max_brightness";

/// Filename for the current brightness, read and written.
pub const FILE_BRIGHTNESS: &str = "brightness";

/// Attribute holding the driver layer that exposes the device
pub const ATTR_TYPE: &str = "type";

/// Raw devices with more levels than this are never written a zero.
pub const RAW_FINE_GRAINED_ABOVE: u32 = 99;

/// Matches every device name
pub const DEFAULT_DEVICE_REGEX: &str = ".";

/// Directory name under the user's config dir
pub const CONFIG_DIR_NAME: &str = "sugar-backlight-helper";
