//! The working image as a buffer shared by every worker.
//!
//! Workers never hold `&mut` to the image. Each pixel channel is a relaxed
//! atomic byte, and the pipeline's barriers order the writes of one phase
//! before the reads of the next. Which worker may write which pixel rows is
//! fixed when a [`RowWriter`] is handed out: writing outside its rows panics.

use std::ops::Range;
use std::sync::atomic::{AtomicU8, Ordering};

use contour_common::{ContourError, ContourResult, Image, Rgb};

/// Row-major RGB image readable by all workers, writable through [`RowWriter`]s.
pub struct SharedImage {
    width: usize,
    height: usize,
    channels: Vec<AtomicU8>,
}

impl SharedImage {
    /// A black image of the given size.
    pub fn blank(width: usize, height: usize) -> ContourResult<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| {
                ContourError::invalid_image(format!("image dimensions {}x{} overflow", width, height))
            })?;
        let mut channels = Vec::new();
        channels
            .try_reserve_exact(len)
            .map_err(|_| ContourError::Allocation { what: "working image", bytes: len })?;
        channels.resize_with(len, || AtomicU8::new(0));
        Ok(Self { width, height, channels })
    }

    /// Take over an existing image's pixels.
    pub fn from_image(image: &Image) -> ContourResult<Self> {
        let shared = Self::blank(image.width(), image.height())?;
        for (slot, px) in shared.channels.chunks_exact(3).zip(image.pixels()) {
            slot[0].store(px.red, Ordering::Relaxed);
            slot[1].store(px.green, Ordering::Relaxed);
            slot[2].store(px.blue, Ordering::Relaxed);
        }
        Ok(shared)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        let base = (y * self.width + x) * 3;
        Rgb::new(
            self.channels[base].load(Ordering::Relaxed),
            self.channels[base + 1].load(Ordering::Relaxed),
            self.channels[base + 2].load(Ordering::Relaxed),
        )
    }

    /// Write access to pixel rows `rows`.
    ///
    /// # Panics
    /// If `rows` reaches past the bottom of the image.
    pub fn rows(&self, rows: Range<usize>) -> RowWriter<'_> {
        assert!(
            rows.start <= rows.end && rows.end <= self.height,
            "rows {:?} outside image of height {}",
            rows,
            self.height
        );
        RowWriter { image: self, rows }
    }

    /// Consume the buffer once all workers have been joined.
    pub fn into_image(self) -> ContourResult<Image> {
        let pixels = self
            .channels
            .into_iter()
            .map(AtomicU8::into_inner)
            .collect::<Vec<_>>()
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Image::new(self.width, self.height, pixels)
    }
}

/// Permission to write one contiguous band of pixel rows.
pub struct RowWriter<'a> {
    image: &'a SharedImage,
    rows: Range<usize>,
}

impl RowWriter<'_> {
    /// The pixel rows this writer owns.
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    /// Set pixel `(x, y)`.
    ///
    /// # Panics
    /// If `y` is not one of this writer's rows or `x` is past the right edge.
    #[inline]
    pub fn put(&self, x: usize, y: usize, px: Rgb) {
        assert!(
            self.rows.contains(&y),
            "row {} not owned by writer for rows {:?}",
            y,
            self.rows
        );
        assert!(x < self.image.width, "column {} out of bounds", x);
        let base = (y * self.image.width + x) * 3;
        let channels = &self.image.channels;
        channels[base].store(px.red, Ordering::Relaxed);
        channels[base + 1].store(px.green, Ordering::Relaxed);
        channels[base + 2].store(px.blue, Ordering::Relaxed);
    }

    /// Copy `src` into row `y` starting at column `x`.
    #[inline]
    pub fn put_span(&self, x: usize, y: usize, src: &[Rgb]) {
        assert!(
            self.rows.contains(&y),
            "row {} not owned by writer for rows {:?}",
            y,
            self.rows
        );
        assert!(x + src.len() <= self.image.width, "span past right edge");
        let base = (y * self.image.width + x) * 3;
        let dst = &self.image.channels[base..base + src.len() * 3];
        for (slot, px) in dst.chunks_exact(3).zip(src) {
            slot[0].store(px.red, Ordering::Relaxed);
            slot[1].store(px.green, Ordering::Relaxed);
            slot[2].store(px.blue, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_shared_buffer() {
        let pixels = (0..6).map(|v| Rgb::new(v, v + 1, v + 2)).collect();
        let image = Image::new(3, 2, pixels).unwrap();
        let shared = SharedImage::from_image(&image).unwrap();
        assert_eq!(shared.pixel(1, 1), Rgb::new(4, 5, 6));
        assert_eq!(shared.into_image().unwrap(), image);
    }

    #[test]
    fn test_writer_writes_owned_rows() {
        let shared = SharedImage::blank(4, 4).unwrap();
        let writer = shared.rows(1..3);
        writer.put(3, 2, Rgb::WHITE);
        writer.put_span(0, 1, &[Rgb::gray(7), Rgb::gray(8)]);
        assert_eq!(shared.pixel(3, 2), Rgb::WHITE);
        assert_eq!(shared.pixel(1, 1), Rgb::gray(8));
        assert_eq!(shared.pixel(0, 0), Rgb::BLACK);
    }

    #[test]
    #[should_panic(expected = "not owned")]
    fn test_writer_rejects_foreign_row() {
        let shared = SharedImage::blank(4, 4).unwrap();
        shared.rows(0..2).put(0, 2, Rgb::WHITE);
    }

    #[test]
    #[should_panic(expected = "outside image")]
    fn test_rows_past_bottom_rejected() {
        let shared = SharedImage::blank(4, 4).unwrap();
        let _ = shared.rows(2..5);
    }

    #[test]
    fn test_empty_writer_is_valid() {
        let shared = SharedImage::blank(2, 2).unwrap();
        assert!(shared.rows(2..2).rows().is_empty());
    }
}
