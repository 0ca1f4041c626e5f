//! Backdrop loading pipeline: read, detect format, and decode.
//!
//! A static template replaces the generated one for every record in a batch.
//! It is read once, decoded into a [`LoadedImage`], and cloned per record.
//!
//! 1. **Read** - [`load_backdrop()`] reads the file.
//! 2. **Detect** - [`detect_format()`] decides between SVG and raster from the
//!    extension and magic bytes.
//! 3. **Decode** - the [`BackdropDecoder`] trait with [`SvgDecoder`] and
//!    [`RasterDecoder`] implementations.

use std::fs;
use std::path::Path;

use laurel_common::image::LoadedImage;
use tiny_skia::Pixmap;

use crate::RenderError;

/// Detected backdrop format.
///
/// Only two variants are needed: the `image` crate handles raster sub-format
/// detection (PNG/JPEG/GIF/WebP/…) internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropFormat {
    /// SVG vector image (decoded via usvg + resvg).
    Svg,
    /// Raster image (decoded via the `image` crate).
    Raster,
}

/// Detect whether `bytes` hold an SVG or a raster image.
///
/// 1. **Extension check** - `.svg` in `path`.
/// 2. **Magic-byte sniffing** - skip leading whitespace and look for `<?xml`
///    or `<svg` in the first 256 bytes.
/// 3. **Default** - [`BackdropFormat::Raster`].
#[must_use]
pub fn detect_format(path: &Path, bytes: &[u8]) -> BackdropFormat {
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
    {
        return BackdropFormat::Svg;
    }

    let trimmed = bytes
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take(256)
        .copied()
        .collect::<Vec<u8>>();

    if trimmed.starts_with(b"<?xml") || trimmed.starts_with(b"<svg") {
        return BackdropFormat::Svg;
    }

    BackdropFormat::Raster
}

/// A decoder that can turn raw bytes into a [`LoadedImage`].
pub trait BackdropDecoder {
    /// Human-readable name (for diagnostics).
    fn name(&self) -> &'static str;

    /// Whether this decoder handles the given format.
    fn supports(&self, format: BackdropFormat) -> bool;

    /// Attempt to decode `bytes` into a [`LoadedImage`].
    ///
    /// # Errors
    ///
    /// Returns an error string if the bytes cannot be decoded by this decoder.
    fn decode(&self, bytes: &[u8]) -> Result<LoadedImage, String>;
}

/// Decodes SVG backdrops via usvg → resvg rasterization at intrinsic size.
pub struct SvgDecoder;

impl BackdropDecoder for SvgDecoder {
    fn name(&self) -> &'static str {
        "SVG (resvg)"
    }

    fn supports(&self, format: BackdropFormat) -> bool {
        format == BackdropFormat::Svg
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn decode(&self, bytes: &[u8]) -> Result<LoadedImage, String> {
        let opts = usvg::Options::default();
        let tree =
            usvg::Tree::from_data(bytes, &opts).map_err(|e| format!("failed to parse SVG: {e}"))?;

        let size = tree.size();
        let (w, h) = (size.width().ceil() as u32, size.height().ceil() as u32);
        if w == 0 || h == 0 {
            return Err("SVG has zero-size dimensions".to_string());
        }

        let mut pixmap =
            Pixmap::new(w, h).ok_or_else(|| "failed to allocate pixmap for SVG".to_string())?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        // resvg produces premultiplied pixels; backdrops are straight RGBA.
        let rgba = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        LoadedImage::new(w, h, rgba).ok_or_else(|| "SVG pixel buffer has the wrong size".to_string())
    }
}

/// Decodes raster backdrops (PNG, JPEG, GIF, WebP, …) via the `image` crate.
pub struct RasterDecoder;

impl BackdropDecoder for RasterDecoder {
    fn name(&self) -> &'static str {
        "Raster (image crate)"
    }

    fn supports(&self, format: BackdropFormat) -> bool {
        format == BackdropFormat::Raster
    }

    fn decode(&self, bytes: &[u8]) -> Result<LoadedImage, String> {
        let dynamic_img =
            image::load_from_memory(bytes).map_err(|e| format!("could not decode image ({e})"))?;
        let rgba = dynamic_img.to_rgba8();
        let (w, h) = rgba.dimensions();
        LoadedImage::new(w, h, rgba.into_raw())
            .ok_or_else(|| "decoded pixel buffer has the wrong size".to_string())
    }
}

/// Format detection plus the decoders to dispatch to.
pub struct BackdropLoader {
    decoders: Vec<Box<dyn BackdropDecoder>>,
}

impl BackdropLoader {
    /// Create a loader with the default decoders (SVG + raster).
    #[must_use]
    pub fn new() -> Self {
        Self {
            decoders: vec![Box::new(SvgDecoder), Box::new(RasterDecoder)],
        }
    }

    /// Detect the format of `bytes` and decode them.
    ///
    /// # Errors
    ///
    /// Returns an error string if no decoder supports the detected format or
    /// if decoding fails.
    pub fn decode(&self, bytes: &[u8], path: &Path) -> Result<LoadedImage, String> {
        let format = detect_format(path, bytes);

        for decoder in &self.decoders {
            if decoder.supports(format) {
                return decoder
                    .decode(bytes)
                    .map_err(|reason| format!("{}: {reason}", decoder.name()));
            }
        }

        Err(format!("no decoder available for format {format:?}"))
    }
}

impl Default for BackdropLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and decode the backdrop at `path`.
///
/// # Errors
///
/// Returns [`RenderError::ReadBackdrop`] if the file cannot be read and
/// [`RenderError::DecodeBackdrop`] if it is not a supported image.
pub fn load_backdrop(path: &Path) -> Result<LoadedImage, RenderError> {
    let bytes = fs::read(path).map_err(|source| RenderError::ReadBackdrop {
        path: path.to_path_buf(),
        source,
    })?;
    BackdropLoader::new()
        .decode(&bytes, path)
        .map_err(|reason| RenderError::DecodeBackdrop {
            path: path.to_path_buf(),
            reason,
        })
}
