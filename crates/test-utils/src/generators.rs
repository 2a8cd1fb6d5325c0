//! Test data generators for synthetic source images and glyph tables.
//!
//! These generators create predictable, verifiable patterns so that grid
//! cells and stamped glyphs can be checked against closed-form expectations.

use contour_common::{Image, Rgb};

/// Number of glyphs in a contour table.
pub const CODE_COUNT: u8 = 16;

/// Creates an image of a single colour.
pub fn solid_image(width: usize, height: usize, color: Rgb) -> Image {
    Image::filled(width, height, color).expect("valid test image")
}

/// Creates a grey image whose level rises left to right from 0 to 255.
///
/// Column `x` has level `x * 255 / (width - 1)`.
pub fn gradient_image(width: usize, height: usize) -> Image {
    let mut pixels = Vec::with_capacity(width * height);
    for _ in 0..height {
        for x in 0..width {
            let level = if width > 1 { x * 255 / (width - 1) } else { 0 };
            pixels.push(Rgb::gray(level as u8));
        }
    }
    Image::new(width, height, pixels).expect("valid test image")
}

/// Creates a dark disc (level 40) centred in a white image.
///
/// The radius is a quarter of the smaller dimension.
pub fn disc_image(width: usize, height: usize) -> Image {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let radius = width.min(height) as f64 / 4.0;

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let inside = dx * dx + dy * dy <= radius * radius;
            pixels.push(if inside { Rgb::gray(40) } else { Rgb::WHITE });
        }
    }
    Image::new(width, height, pixels).expect("valid test image")
}

/// Creates a noisy-looking but deterministic colour image.
///
/// Channels are derived from a small integer hash of the coordinates, so the
/// same call always yields the same pixels.
pub fn hashed_image(width: usize, height: usize) -> Image {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let h = (x as u32)
                .wrapping_mul(73_856_093)
                ^ (y as u32).wrapping_mul(19_349_663);
            pixels.push(Rgb::new(h as u8, (h >> 8) as u8, (h >> 16) as u8));
        }
    }
    Image::new(width, height, pixels).expect("valid test image")
}

/// Grey level used to paint glyph `code` in [`coded_glyphs`].
pub fn glyph_level(code: u8) -> u8 {
    code * 16 + 7
}

/// Creates 16 solid glyphs of `width × height`, glyph `k` painted with
/// [`glyph_level`]`(k)`, so a stamped block reveals its configuration code.
pub fn coded_glyphs(width: usize, height: usize) -> Vec<Image> {
    (0..CODE_COUNT)
        .map(|code| solid_image(width, height, Rgb::gray(glyph_level(code))))
        .collect()
}

/// Configuration code encoded by the pixel at `(x, y)` of an image composited
/// from [`coded_glyphs`], or `None` if the pixel is not a coded glyph level.
pub fn glyph_code_at(image: &Image, x: usize, y: usize) -> Option<u8> {
    let px = image.pixel(x, y);
    if px.red != px.green || px.green != px.blue {
        return None;
    }
    (0..CODE_COUNT).find(|&code| glyph_level(code) == px.red)
}
