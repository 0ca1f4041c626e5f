//! Decoded image data shared between the loader and the renderer.

/// Decoded image data for a static certificate backdrop.
///
/// Contains straight (non-premultiplied) RGBA pixel data and intrinsic
/// dimensions. Cloning yields an independent copy, so a backdrop loaded once
/// per batch is never mutated by the records drawn on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Intrinsic width of the image in pixels.
    width: u32,
    /// Intrinsic height of the image in pixels.
    height: u32,
    /// Raw RGBA pixel data (width * height * 4 bytes).
    rgba_data: Vec<u8>,
}

impl LoadedImage {
    /// Create a new `LoadedImage` from decoded RGBA pixel data.
    ///
    /// Returns `None` if `rgba_data` is not exactly `width * height * 4` bytes.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba_data: Vec<u8>) -> Option<Self> {
        let expected = u64::from(width) * u64::from(height) * 4;
        if rgba_data.len() as u64 != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba_data,
        })
    }

    /// Intrinsic width of the image in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height of the image in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data.
    #[must_use]
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }

    /// The RGBA value at `(x, y)`, or `None` outside the image.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.rgba_data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
