//! Convert a single PNG image into a macOS ICNS icon holding the standard
//! Apple icon sizes from 16x16 up to 1024x1024.

pub mod error;
pub mod icns_gen;

pub use error::{ConvertError, Result};
pub use icns_gen::{convert, ensure_alpha, IconSize, ICON_SIZES};
