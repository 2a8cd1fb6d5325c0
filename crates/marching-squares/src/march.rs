//! Contour compositing: stamping one glyph per lattice cell.
//!
//! Cell `(i, j)` spans lattice points `(i, j)`..`(i + 1, j + 1)`. Its
//! configuration code packs the four corners as
//! `top-left << 3 | top-right << 2 | bottom-right << 1 | bottom-left`, and
//! glyph `code` overwrites the `step_x × step_y` pixel block whose top-left
//! corner is `(j * step_x, i * step_y)`. Distinct cells never share pixels.

use std::ops::Range;

use crate::glyphs::GlyphTable;
use crate::grid::{Grid, Lattice};
use crate::partition::WorkerIndex;
use crate::shared::{RowWriter, SharedImage};

/// 4-bit configuration code of cell `(i, j)`.
///
/// Requires `i < grid.rows()` and `j < grid.cols()`.
#[inline]
pub fn configuration_code(grid: &Grid, i: usize, j: usize) -> u8 {
    8 * grid.get(i, j) + 4 * grid.get(i, j + 1) + 2 * grid.get(i + 1, j + 1) + grid.get(i + 1, j)
}

/// Pixel rows covered by the cells of lattice rows `cells`.
#[inline]
pub fn pixel_rows(cells: &Range<usize>, step_y: usize) -> Range<usize> {
    cells.start * step_y..cells.end * step_y
}

/// Stamp glyphs for every cell of lattice rows `cells`.
///
/// `writer` must own the pixel rows returned by [`pixel_rows`] for `cells`.
pub fn march_rows(
    grid: &Grid,
    glyphs: &GlyphTable,
    lattice: &Lattice,
    cells: Range<usize>,
    writer: &RowWriter<'_>,
) {
    for i in cells {
        for j in 0..lattice.cols {
            let code = configuration_code(grid, i, j);
            stamp(glyphs, code, j * lattice.step_x, i * lattice.step_y, writer);
        }
    }
}

/// Copy glyph `code` row by row into the block at `(x, y)`.
fn stamp(glyphs: &GlyphTable, code: u8, x: usize, y: usize, writer: &RowWriter<'_>) {
    let glyph = glyphs.glyph(code);
    for (dy, row) in glyph.pixels().chunks_exact(glyph.width()).enumerate() {
        writer.put_span(x, y + dy, row);
    }
}

/// The compositing phase for one worker: its share of the lattice rows.
pub fn march_partition(
    grid: &Grid,
    glyphs: &GlyphTable,
    lattice: &Lattice,
    working: &SharedImage,
    worker: WorkerIndex,
) {
    let cells = worker.partition(lattice.rows);
    let writer = working.rows(pixel_rows(&cells, lattice.step_y));
    march_rows(grid, glyphs, lattice, cells, &writer);
}
