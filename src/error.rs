//! Error type for the PNG to ICNS conversion.

use icns::OSType;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Input file '{}' not found.", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to decode image '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {size}x{size} bitmap: {source}")]
    Encode {
        size: u32,
        #[source]
        source: image::ImageError,
    },

    #[error("Can't add {ostype} to icon family: {source}")]
    AddIcon {
        ostype: OSType,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
