//! Common types shared by the contour pipeline crates and the CLI.

pub mod error;
pub mod image;

pub use error::{ContourError, ContourResult};
pub use image::{Image, Rgb};
