//! Locating the directory of real contour glyphs (`0.ppm` … `15.ppm`).

use std::path::{Path, PathBuf};

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Whether `dir` holds all 16 glyph files.
pub fn is_glyph_dir(dir: &Path) -> bool {
    (0..16).all(|code| dir.join(format!("{}.ppm", code)).is_file())
}

/// Searches for a glyph directory in multiple locations.
///
/// This function checks the following locations in order:
/// 1. Environment variable `CONTOUR_GLYPH_DIR` (if set)
/// 2. `contours/` at the workspace root
/// 3. `services/contour-cli/testdata/contours/`
pub fn find_glyph_dir() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(dir) = std::env::var("CONTOUR_GLYPH_DIR") {
        candidates.push(PathBuf::from(dir));
    }

    let root = workspace_root();
    candidates.push(root.join("contours"));
    candidates.push(
        root.join("services")
            .join("contour-cli")
            .join("testdata")
            .join("contours"),
    );

    candidates.into_iter().find(|dir| is_glyph_dir(dir))
}
