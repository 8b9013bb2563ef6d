use std::path::PathBuf;

use thiserror::Error;

/// Result type returned from functions that can have our `Error`s.
pub type Result<T, E = BacklightError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BacklightError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("No devices were found")]
    NotFound,

    #[error("Could not read from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: AttributeError,
    },

    #[error("Could not get maximum value for {}", path.display())]
    Precondition {
        path: PathBuf,
        /// Missing when the maximum was readable but zero
        #[source]
        source: Option<AttributeError>,
    },

    #[error("Could not write {value} to {}: {source}", path.display())]
    Write {
        value: i64,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Config(String),
}

/// Why an attribute file did not yield an integer.
#[derive(Error, Debug)]
pub enum AttributeError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    ParseInt(#[from] std::num::ParseIntError),
}
