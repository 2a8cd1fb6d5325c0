//! Shared test utilities for the parallel contour workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic source images with known luminance layouts
//! - Glyph tables whose glyphs encode their own configuration code
//! - Glyph directory discovery and a skip macro for tests needing real glyphs
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use generators::*;
pub use paths::*;

/// Macro to skip a test if no directory of real glyph files is available.
///
/// # Usage
///
/// ```ignore
/// use test_utils::require_glyph_dir;
///
/// #[test]
/// fn test_with_real_glyphs() {
///     let dir = require_glyph_dir!();
///     // Test code reading dir.join("0.ppm") ...
/// }
/// ```
///
/// If the directory is not found, the test prints a skip message and returns early.
#[macro_export]
macro_rules! require_glyph_dir {
    () => {{
        match $crate::find_glyph_dir() {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: glyph directory not found. Provide contours/0.ppm..15.ppm or set CONTOUR_GLYPH_DIR."
                );
                return;
            }
        }
    }};
}
