use crate::error::{ConvertError, Result};
use icns::{IconFamily, IconType, OSType};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::FilterType,
    ColorType, DynamicImage, ImageEncoder,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{debug, info};

/// One bitmap of the generated container: its edge length in pixels and the
/// icon type it is stored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSize {
    pub size: u32,
    pub icon_type: IconType,
}

/// Apple icon sizes written to every ICNS file, smallest first.
pub const ICON_SIZES: [IconSize; 7] = [
    IconSize { size: 16, icon_type: IconType::RGBA32_16x16 },
    IconSize { size: 32, icon_type: IconType::RGBA32_32x32 },
    IconSize { size: 64, icon_type: IconType::RGBA32_64x64 },
    IconSize { size: 128, icon_type: IconType::RGBA32_128x128 },
    IconSize { size: 256, icon_type: IconType::RGBA32_256x256 },
    IconSize { size: 512, icon_type: IconType::RGBA32_512x512 },
    IconSize { size: 1024, icon_type: IconType::RGBA32_512x512_2x },
];

impl IconSize {
    /// The four-character OSType tag, e.g. `icp4`.
    pub fn ostype(&self) -> OSType {
        self.icon_type.ostype()
    }
}

/// Convert `input` into an ICNS file at `output`.
///
/// Nothing is written unless every bitmap was produced, so a missing or
/// undecodable input never leaves an output file behind.
pub fn convert(input: &Path, output: &Path) -> Result<()> {
    let source = load_image(input)?;
    let family = build_icon_family(&source)?;
    write_icon_family(&family, output)?;

    info!(output = %output.display(), "wrote icon family");
    Ok(())
}

/// Open and decode the source image, whatever its file name.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.is_file() {
        return Err(ConvertError::NotFound {
            path: path.to_path_buf(),
        });
    }

    // The format comes from the file contents; the extension is only a fallback.
    image::io::Reader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::from)
        .and_then(|reader| reader.decode())
        .map_err(|source| ConvertError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Return `image` in a pixel format that carries an alpha channel.
///
/// Images that already have alpha are returned untouched. Others keep their
/// colour data and become fully opaque, staying at 16 bits or float precision
/// when the source had it.
pub fn ensure_alpha(image: DynamicImage) -> DynamicImage {
    if image.color().has_alpha() {
        return image;
    }

    match image {
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageRgb16(_) => {
            DynamicImage::ImageRgba16(image.to_rgba16())
        }
        DynamicImage::ImageRgb32F(_) => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        _ => DynamicImage::ImageRgba8(image.to_rgba8()),
    }
}

/// Resize `source` to every entry of [`ICON_SIZES`] and collect the bitmaps
/// into a new icon family.
pub fn build_icon_family(source: &DynamicImage) -> Result<IconFamily> {
    let source = ensure_alpha(source.clone());
    let mut family = IconFamily::new();

    for entry in ICON_SIZES {
        let resized = source.resize_exact(entry.size, entry.size, FilterType::Lanczos3);

        let mut buf = Vec::new();
        let rgba_image = resized.to_rgba8();
        write_png(rgba_image.as_raw(), &mut buf, entry.size)
            .map_err(|source| ConvertError::Encode {
                size: entry.size,
                source,
            })?;

        let add_error = |source| ConvertError::AddIcon {
            ostype: entry.ostype(),
            source,
        };
        let image = icns::Image::read_png(&buf[..]).map_err(add_error)?;
        family
            .add_icon_with_type(&image, entry.icon_type)
            .map_err(add_error)?;

        debug!(size = entry.size, ostype = %entry.ostype(), "added icon");
    }

    Ok(family)
}

/// Serialize `family` to `path`, replacing any existing file.
pub fn write_icon_family(family: &IconFamily, path: &Path) -> Result<()> {
    let write_error = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut out_file = BufWriter::new(File::create(path).map_err(write_error)?);
    family.write(&mut out_file).map_err(write_error)?;
    out_file.flush().map_err(write_error)?;
    Ok(())
}

// Fixed PNG settings, so the same source always yields the same bytes.
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> image::ImageResult<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)
}
