//! The 16 contour glyphs, indexed by configuration code.

use contour_common::{ContourError, ContourResult, Image};

/// Number of marching-squares configurations (4 corners, 1 bit each).
pub const GLYPH_COUNT: usize = 16;

/// Read-only table mapping a configuration code to its glyph bitmap.
///
/// All glyphs share the same size, which must equal the lattice step.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    glyphs: Vec<Image>,
    width: usize,
    height: usize,
}

impl GlyphTable {
    /// Build a table from exactly [`GLYPH_COUNT`] same-sized glyphs,
    /// ordered by configuration code.
    pub fn new(glyphs: Vec<Image>) -> ContourResult<Self> {
        if glyphs.len() != GLYPH_COUNT {
            return Err(ContourError::glyph_table(format!(
                "expected {} glyphs, got {}",
                GLYPH_COUNT,
                glyphs.len()
            )));
        }

        let (width, height) = glyphs[0].dimensions();
        if let Some((code, glyph)) = glyphs
            .iter()
            .enumerate()
            .find(|(_, g)| g.dimensions() != (width, height))
        {
            return Err(ContourError::glyph_table(format!(
                "glyph {} is {}x{}, expected {}x{}",
                code,
                glyph.width(),
                glyph.height(),
                width,
                height
            )));
        }

        Ok(Self { glyphs, width, height })
    }

    /// Glyph for configuration `code` (`0..16`).
    #[inline]
    pub fn glyph(&self, code: u8) -> &Image {
        &self.glyphs[code as usize]
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Check that every glyph covers exactly one `step_x × step_y` cell.
    pub fn check_step(&self, step_x: usize, step_y: usize) -> ContourResult<()> {
        if (self.width, self.height) != (step_x, step_y) {
            return Err(ContourError::glyph_table(format!(
                "glyphs are {}x{} but the lattice step is {}x{}",
                self.width, self.height, step_x, step_y
            )));
        }
        Ok(())
    }
}
