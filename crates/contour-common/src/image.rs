//! Decoded RGB images.
//!
//! Pixels are stored row-major: pixel `(x, y)` lives at index `y * width + x`.

use crate::{ContourError, ContourResult};

/// One pixel, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::gray(0);
    pub const WHITE: Rgb = Rgb::gray(255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// A pixel with all three channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Unweighted integer average of the three channels.
    #[inline]
    pub fn luminance(self) -> u8 {
        ((self.red as u16 + self.green as u16 + self.blue as u16) / 3) as u8
    }

    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    #[inline]
    pub fn from_channels(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// An owned RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Image {
    /// Wrap an existing pixel buffer.
    ///
    /// Fails when either dimension is zero or the buffer length does not
    /// match `width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> ContourResult<Self> {
        if width == 0 || height == 0 {
            return Err(ContourError::invalid_image(format!(
                "image dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let expected = width.checked_mul(height).ok_or_else(|| {
            ContourError::invalid_image(format!("image dimensions {}x{} overflow", width, height))
        })?;
        if pixels.len() != expected {
            return Err(ContourError::invalid_image(format!(
                "expected {} pixels for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Allocate an image filled with a single colour.
    pub fn filled(width: usize, height: usize, color: Rgb) -> ContourResult<Self> {
        let len = width.checked_mul(height).ok_or_else(|| {
            ContourError::invalid_image(format!("image dimensions {}x{} overflow", width, height))
        })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| ContourError::Allocation {
                what: "image",
                bytes: len.saturating_mul(std::mem::size_of::<Rgb>()),
            })?;
        pixels.resize(len, color);
        Self::new(width, height, pixels)
    }

    /// Build an image from interleaved RGB bytes (`width * height * 3`).
    pub fn from_raw_rgb(width: usize, height: usize, bytes: &[u8]) -> ContourResult<Self> {
        if bytes.len() != width.saturating_mul(height).saturating_mul(3) {
            return Err(ContourError::invalid_image(format!(
                "expected {} bytes of RGB data for {}x{}, got {}",
                width.saturating_mul(height).saturating_mul(3),
                width,
                height,
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Interleaved RGB bytes, row-major.
    pub fn to_raw_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.channels()).collect()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        self.pixels[y * self.width + x]
    }

    /// Pixel at `(x, y)` with coordinates clamped to the border (edge replication).
    #[inline]
    pub fn pixel_clamped(&self, x: isize, y: isize) -> Rgb {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.pixels[cy * self.width + cx]
    }

    /// Whether the image is larger than `width × height` in either dimension.
    pub fn exceeds(&self, width: usize, height: usize) -> bool {
        self.width > width || self.height > height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_is_integer_average() {
        assert_eq!(Rgb::new(255, 255, 255).luminance(), 255);
        assert_eq!(Rgb::new(100, 100, 100).luminance(), 100);
        // (10 + 20 + 31) / 3 = 20.33 -> 20
        assert_eq!(Rgb::new(10, 20, 31).luminance(), 20);
    }

    #[test]
    fn test_new_rejects_mismatched_buffer() {
        assert!(Image::new(2, 2, vec![Rgb::BLACK; 3]).is_err());
        assert!(Image::new(0, 2, vec![]).is_err());
        assert!(Image::new(2, 2, vec![Rgb::BLACK; 4]).is_ok());
    }

    #[test]
    fn test_row_major_layout() {
        let pixels = (0..6).map(|v| Rgb::gray(v as u8)).collect();
        let image = Image::new(3, 2, pixels).unwrap();
        assert_eq!(image.pixel(2, 0), Rgb::gray(2));
        assert_eq!(image.pixel(0, 1), Rgb::gray(3));
        assert_eq!(image.pixel(2, 1), Rgb::gray(5));
    }

    #[test]
    fn test_pixel_clamped_replicates_edges() {
        let pixels = (0..4).map(|v| Rgb::gray(v as u8 * 10)).collect();
        let image = Image::new(2, 2, pixels).unwrap();
        assert_eq!(image.pixel_clamped(-5, -5), Rgb::gray(0));
        assert_eq!(image.pixel_clamped(7, 0), Rgb::gray(10));
        assert_eq!(image.pixel_clamped(0, 9), Rgb::gray(20));
        assert_eq!(image.pixel_clamped(3, 3), Rgb::gray(30));
    }

    #[test]
    fn test_raw_rgb_layout() {
        let image = Image::from_raw_rgb(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(image.pixel(1, 0), Rgb::new(4, 5, 6));
        assert_eq!(image.to_raw_rgb(), vec![1, 2, 3, 4, 5, 6]);
        assert!(Image::from_raw_rgb(2, 1, &[1, 2, 3]).is_err());
    }

    #[test]
    fn test_exceeds() {
        let image = Image::filled(10, 4, Rgb::BLACK).unwrap();
        assert!(!image.exceeds(10, 4));
        assert!(image.exceeds(9, 4));
        assert!(image.exceeds(10, 3));
        assert!(!image.exceeds(20, 20));
    }
}
