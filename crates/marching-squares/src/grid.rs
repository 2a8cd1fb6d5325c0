//! Binary sample lattice and the grid sampling passes.
//!
//! The lattice has `rows + 1` by `cols + 1` points, where `rows = height /
//! step_y` and `cols = width / step_x`. Point `(i, j)` samples pixel
//! `(j * step_x, i * step_y)`, except along the far edges: the last column is
//! sampled from the image's rightmost pixel column and the last row from its
//! bottom pixel row. A point is `1` when the pixel's luminance is at or below
//! `sigma`, `0` otherwise. The bottom-right corner is always `0`.

use std::ops::Range;
use std::sync::atomic::{AtomicU8, Ordering};

use contour_common::{ContourError, ContourResult, Rgb};

use crate::shared::SharedImage;

/// Lattice dimensions derived from an image size and a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice {
    /// Whole steps down the image (`p`).
    pub rows: usize,
    /// Whole steps across the image (`q`).
    pub cols: usize,
    pub step_x: usize,
    pub step_y: usize,
}

impl Lattice {
    pub fn new(width: usize, height: usize, step_x: usize, step_y: usize) -> Self {
        Self {
            rows: height / step_y,
            cols: width / step_x,
            step_x,
            step_y,
        }
    }
}

/// Flat `(rows + 1) × (cols + 1)` arena of 0/1 cells.
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<AtomicU8>,
}

impl Grid {
    /// Allocate a zeroed grid for `lattice`.
    pub fn new(lattice: Lattice) -> ContourResult<Self> {
        let len = (lattice.rows + 1)
            .checked_mul(lattice.cols + 1)
            .ok_or_else(|| ContourError::invalid_config("grid dimensions overflow"))?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| ContourError::Allocation { what: "grid", bytes: len })?;
        cells.resize_with(len, || AtomicU8::new(0));
        Ok(Self {
            rows: lattice.rows,
            cols: lattice.cols,
            cells,
        })
    }

    /// Number of whole lattice rows (`p`); the grid stores `p + 1`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of whole lattice columns (`q`); the grid stores `q + 1`.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell `(i, j)` for `i <= rows`, `j <= cols`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u8 {
        assert!(i <= self.rows && j <= self.cols, "cell ({}, {}) out of bounds", i, j);
        self.cells[i * (self.cols + 1) + j].load(Ordering::Relaxed)
    }

    /// Copy of all cells, row-major with `cols + 1` cells per row.
    pub fn to_vec(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }

    #[inline]
    fn set(&self, i: usize, j: usize, value: u8) {
        self.cells[i * (self.cols + 1) + j].store(value, Ordering::Relaxed);
    }

    /// Write access to lattice rows `rows`, every column including the last.
    pub fn rows_writer(&self, rows: Range<usize>) -> GridRows<'_> {
        assert!(rows.end <= self.rows, "lattice rows {:?} out of bounds", rows);
        GridRows { grid: self, rows }
    }

    /// Write access to the last lattice row for columns `cols`. The corner
    /// owner additionally writes the fixed bottom-right cell.
    pub fn bottom_edge_writer(&self, cols: Range<usize>, owns_corner: bool) -> GridBottomEdge<'_> {
        assert!(cols.end <= self.cols, "lattice columns {:?} out of bounds", cols);
        GridBottomEdge { grid: self, cols, owns_corner }
    }
}

/// Permission to write a band of lattice rows.
pub struct GridRows<'a> {
    grid: &'a Grid,
    rows: Range<usize>,
}

impl GridRows<'_> {
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    #[inline]
    pub fn set(&self, i: usize, j: usize, inside: bool) {
        assert!(self.rows.contains(&i), "lattice row {} not owned", i);
        assert!(j <= self.grid.cols, "lattice column {} out of bounds", j);
        self.grid.set(i, j, inside as u8);
    }
}

/// Permission to write a span of the last lattice row.
pub struct GridBottomEdge<'a> {
    grid: &'a Grid,
    cols: Range<usize>,
    owns_corner: bool,
}

impl GridBottomEdge<'_> {
    pub fn cols(&self) -> Range<usize> {
        self.cols.clone()
    }

    #[inline]
    pub fn set(&self, j: usize, inside: bool) {
        assert!(self.cols.contains(&j), "lattice column {} not owned", j);
        self.grid.set(self.grid.rows, j, inside as u8);
    }

    /// Fix the bottom-right corner to 0.
    pub fn clear_corner(&self) {
        assert!(self.owns_corner, "corner cell not owned");
        self.grid.set(self.grid.rows, self.grid.cols, 0);
    }
}

/// Threshold test shared by every sampled point.
#[inline]
pub fn is_inside(px: Rgb, sigma: i32) -> bool {
    i32::from(px.luminance()) <= sigma
}

/// First sampling pass over the rows owned by `writer`.
///
/// Fills `(i, j)` for `j < cols` from the strided lattice position and
/// `(i, cols)` from the image's rightmost pixel column.
pub fn sample_rows(image: &SharedImage, lattice: &Lattice, sigma: i32, writer: &GridRows<'_>) {
    let last_x = image.width() - 1;
    for i in writer.rows() {
        let y = i * lattice.step_y;
        for j in 0..lattice.cols {
            writer.set(i, j, is_inside(image.pixel(j * lattice.step_x, y), sigma));
        }
        writer.set(i, lattice.cols, is_inside(image.pixel(last_x, y), sigma));
    }
}

/// Second sampling pass: the last lattice row, from the image's bottom pixel row.
///
/// Must run only after every worker finished [`sample_rows`].
pub fn sample_bottom_edge(
    image: &SharedImage,
    lattice: &Lattice,
    sigma: i32,
    writer: &GridBottomEdge<'_>,
) {
    let last_y = image.height() - 1;
    for j in writer.cols() {
        writer.set(j, is_inside(image.pixel(j * lattice.step_x, last_y), sigma));
    }
    if writer.owns_corner {
        writer.clear_corner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_dimensions() {
        let lattice = Lattice::new(2048, 1024, 8, 16);
        assert_eq!(lattice.cols, 256);
        assert_eq!(lattice.rows, 64);

        let lattice = Lattice::new(20, 20, 8, 8);
        assert_eq!((lattice.rows, lattice.cols), (2, 2));
    }

    #[test]
    fn test_grid_shape_and_zero_init() {
        let grid = Grid::new(Lattice::new(16, 24, 8, 8)).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.to_vec(), vec![0; 4 * 3]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(is_inside(Rgb::gray(200), 200));
        assert!(!is_inside(Rgb::gray(201), 200));
        assert!(is_inside(Rgb::WHITE, 255));
        assert!(!is_inside(Rgb::BLACK, -1));
    }

    #[test]
    #[should_panic(expected = "not owned")]
    fn test_rows_writer_rejects_foreign_row() {
        let grid = Grid::new(Lattice::new(32, 32, 8, 8)).unwrap();
        grid.rows_writer(0..2).set(2, 0, true);
    }

    #[test]
    #[should_panic(expected = "corner cell not owned")]
    fn test_only_corner_owner_clears_corner() {
        let grid = Grid::new(Lattice::new(32, 32, 8, 8)).unwrap();
        grid.bottom_edge_writer(0..4, false).clear_corner();
    }
}
