//! Parallel marching-squares contour extraction on raster images.
//!
//! The pipeline rescales a source image to a fixed working resolution,
//! thresholds a strided lattice of it into a binary grid, and stamps one of
//! 16 precomputed glyphs into every lattice cell according to the cell's
//! corner configuration.
//!
//! # Architecture
//!
//! ```text
//! MarchingSquares::run(source)
//!      │
//!      ├─► allocate working image + grid, build worker pool
//!      │
//!      └─► every worker, on its own partition:
//!               rescale  (bicubic, rows of the working image)
//!               ── barrier ──
//!               sample   (lattice rows + right edge)
//!               ── barrier ──
//!               sample   (bottom edge, lattice columns)
//!               ── barrier ──
//!               composite (glyph per cell, lattice rows)
//!               ── barrier ──
//! ```

pub mod bicubic;
pub mod config;
pub mod glyphs;
pub mod grid;
pub mod march;
pub mod partition;
pub mod pipeline;
pub mod rescale;
pub mod shared;

pub use bicubic::sample_bicubic;
pub use config::PipelineConfig;
pub use glyphs::{GlyphTable, GLYPH_COUNT};
pub use grid::{Grid, Lattice};
pub use march::configuration_code;
pub use partition::{partition, WorkerIndex};
pub use pipeline::{ContourRun, MarchingSquares, PipelinePhase};
pub use rescale::{needs_rescale, rescale_image};
pub use shared::{RowWriter, SharedImage};

pub use contour_common::{ContourError, ContourResult, Image, Rgb};
