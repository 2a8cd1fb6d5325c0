//! Collaborators of the contour pipeline: image/glyph decoding, output
//! encoding, and configuration layering for the command-line driver.

pub mod io;
pub mod settings;

pub use io::{glyph_path, load_glyph_table, load_image, save_image};
pub use settings::{load_base_config, ConfigOverrides};
