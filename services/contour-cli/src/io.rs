//! Decoding and encoding images through the `image` crate.
//!
//! The format is chosen from the file extension; glyphs are read as
//! `<dir>/0.ppm` … `<dir>/15.ppm`.

use std::path::{Path, PathBuf};

use contour_common::{ContourError, ContourResult, Image};
use marching_squares::{GlyphTable, GLYPH_COUNT};
use tracing::debug;

/// Decode an image file into RGB pixels.
pub fn load_image(path: impl AsRef<Path>) -> ContourResult<Image> {
    let path = path.as_ref();
    let decoded = image::open(path)
        .map_err(|e| ContourError::decode(format!("{}: {}", path.display(), e)))?
        .to_rgb8();
    let (width, height) = decoded.dimensions();
    debug!(path = %path.display(), width, height, "Decoded image");
    Image::from_raw_rgb(width as usize, height as usize, decoded.as_raw())
}

/// Encode `image` to `path`.
pub fn save_image(path: impl AsRef<Path>, image: &Image) -> ContourResult<()> {
    let path = path.as_ref();
    let width = u32::try_from(image.width())
        .map_err(|_| ContourError::invalid_image("width exceeds u32"))?;
    let height = u32::try_from(image.height())
        .map_err(|_| ContourError::invalid_image("height exceeds u32"))?;

    let buffer = image::RgbImage::from_raw(width, height, image.to_raw_rgb())
        .ok_or_else(|| ContourError::invalid_image("pixel buffer does not match dimensions"))?;
    buffer
        .save(path)
        .map_err(|e| ContourError::Io(format!("{}: {}", path.display(), e)))?;

    debug!(path = %path.display(), width, height, "Wrote image");
    Ok(())
}

/// Location of glyph `code` inside `dir`.
pub fn glyph_path(dir: impl AsRef<Path>, code: usize) -> PathBuf {
    dir.as_ref().join(format!("{}.ppm", code))
}

/// Read the 16 contour glyphs from `dir`.
pub fn load_glyph_table(dir: impl AsRef<Path>) -> ContourResult<GlyphTable> {
    let dir = dir.as_ref();
    let glyphs = (0..GLYPH_COUNT)
        .map(|code| load_image(glyph_path(dir, code)))
        .collect::<ContourResult<Vec<_>>>()?;
    GlyphTable::new(glyphs)
}
