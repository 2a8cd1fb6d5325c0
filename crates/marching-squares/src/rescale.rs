//! Resampling the source image down to the working resolution.

use contour_common::{ContourResult, Image};

use crate::bicubic::sample_bicubic;
use crate::partition::WorkerIndex;
use crate::shared::{RowWriter, SharedImage};

/// Whether `source` has to be resampled to fit `target_width × target_height`.
///
/// Only downscaling happens: an image that already fits in both dimensions
/// is used as the working image unchanged.
pub fn needs_rescale(source: &Image, target_width: usize, target_height: usize) -> bool {
    source.exceeds(target_width, target_height)
}

/// Normalized coordinate of index `i` along an axis of `len` samples.
#[inline]
fn normalized(i: usize, len: usize) -> f32 {
    if len > 1 {
        i as f32 / (len - 1) as f32
    } else {
        0.0
    }
}

/// Fill the pixel rows owned by `writer` with bicubic samples of `source`.
///
/// Every column of each owned row is computed; the target size is the size
/// of the image `writer` belongs to (`width × height`).
pub fn rescale_rows(source: &Image, width: usize, height: usize, writer: &RowWriter<'_>) {
    for y in writer.rows() {
        let v = normalized(y, height);
        for x in 0..width {
            let u = normalized(x, width);
            writer.put(x, y, sample_bicubic(source, u, v));
        }
    }
}

/// The rescale phase for one worker: its share of the working image's rows.
pub fn rescale_partition(source: &Image, working: &SharedImage, worker: WorkerIndex) {
    let rows = worker.partition(working.height());
    let writer = working.rows(rows);
    rescale_rows(source, working.width(), working.height(), &writer);
}

/// Single-threaded convenience: the working image for `source`.
///
/// Returns the source unchanged when it already fits the target.
pub fn rescale_image(source: &Image, target_width: usize, target_height: usize) -> ContourResult<Image> {
    if !needs_rescale(source, target_width, target_height) {
        return Ok(source.clone());
    }
    let working = SharedImage::blank(target_width, target_height)?;
    rescale_partition(source, &working, WorkerIndex::new(0, 1));
    working.into_image()
}
