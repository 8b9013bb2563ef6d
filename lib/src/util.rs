use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::consts::CONFIG_DIR_NAME;
use crate::errors::*;

macro_rules! make_log_macro {
    (@wdoll $macro_name:ident, $block_name:literal, ($dol:tt)) => {
        #[allow(unused_macros)]
        macro_rules! $macro_name {
            ($dol($args:tt)+) => {
                ::log::$macro_name!(target: $block_name, $dol($args)+);
            };
        }
    };
    ($macro_name:ident, $block_name:literal) => {
        make_log_macro!(@wdoll $macro_name, $block_name, ($));
    };
}

/// Look up `file` (with optional extension) in this program's config
/// directory, or in `subdir` below it.
pub fn find_file(file: &str, subdir: Option<&str>, extension: Option<&str>) -> Option<PathBuf> {
    let mut path = dirs::config_dir()?.join(CONFIG_DIR_NAME);
    if let Some(subdir) = subdir {
        path.push(subdir);
    }
    path.push(file);
    if let Some(extension) = extension {
        path.set_extension(extension);
    }
    path.is_file().then_some(path)
}

pub fn deserialize_toml_file<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let contents = read_file(path)?;

    toml::from_str(&contents).map_err(|err| {
        #[allow(deprecated)]
        let location_msg = err
            .span()
            .map(|span| {
                let line = 1 + contents.as_bytes()[..(span.start)]
                    .iter()
                    .filter(|b| **b == b'\n')
                    .count();
                format!(" at line {line}")
            })
            .unwrap_or_default();
        BacklightError::Config(format!(
            "Failed to deserialize TOML file {}{}: {}",
            path.display(),
            location_msg,
            err.message()
        ))
    })
}

/// Read a sysfs style attribute file, without its trailing newline.
pub fn read_file(path: impl AsRef<Path>) -> std::io::Result<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(content.trim_end().to_string())
}

/// Read an attribute file holding a single decimal integer.
pub fn read_integer(path: impl AsRef<Path>) -> Result<u32, AttributeError> {
    Ok(read_file(path)?.trim_start().parse()?)
}
