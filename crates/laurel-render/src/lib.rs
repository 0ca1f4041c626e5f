//! Rasterization for the Laurel certificate renderer.
//!
//! # Scope
//!
//! This crate is the last stage of the pipeline:
//!
//! ```text
//! Canvas (backdrop + DisplayList) → Renderer → RgbaImage → PNG
//! ```
//!
//! - **Fonts** - resolve regular and bold faces from configured candidates,
//!   falling back to a built-in bitmap font
//! - **Renderer** - execute a display list with tiny-skia and fontdue
//! - **Image Loading** - decode static backdrops (raster or SVG)

pub mod fonts;
pub mod image_loader;
pub mod renderer;

pub use fonts::{Face, FontBook, FontCandidates, FontLoadError};
pub use image_loader::load_backdrop;
pub use renderer::{Renderer, save_png};

use std::path::PathBuf;

use thiserror::Error;

/// Errors from rasterizing a canvas or reading/writing image files.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The canvas has a zero or oversized dimension.
    #[error("cannot allocate a {width}x{height} canvas")]
    InvalidSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A template file could not be read.
    #[error("failed to read template '{}': {source}", .path.display())]
    ReadBackdrop {
        /// Template path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A template file was read but could not be decoded.
    #[error("failed to decode template '{}': {reason}", .path.display())]
    DecodeBackdrop {
        /// Template path.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },
    /// A certificate image could not be written.
    #[error("failed to save certificate to '{}': {source}", .path.display())]
    Save {
        /// Output path.
        path: PathBuf,
        /// Underlying encoder or I/O error.
        #[source]
        source: image::ImageError,
    },
}
