//! sRGB colors used by the template and the certificate layout.

/// sRGB color represented as straight (non-premultiplied) RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0-255, 255 = fully opaque)
    pub a: u8,
}

impl Color {
    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// An opaque color from its three channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// The fixed certificate palette.
pub mod palette {
    use super::Color;

    /// Warm paper background.
    pub const PAPER: Color = Color::rgb(0xFD, 0xFB, 0xF5);
    /// Primary ink: outer frame, title, course.
    pub const NAVY: Color = Color::rgb(0x1F, 0x3A, 0x5F);
    /// Accent metal: inner frame, accent bar, seal.
    pub const GOLD: Color = Color::rgb(0xC9, 0xA2, 0x27);
    /// Ornament fill.
    pub const GOLD_LIGHT: Color = Color::rgb(0xF3, 0xE6, 0xB3);
    /// Subtitle ink.
    pub const GOLD_DARK: Color = Color::rgb(0xA8, 0x84, 0x1A);
    /// Recipient name ink.
    pub const CRIMSON: Color = Color::rgb(0x8B, 0x1E, 0x3F);
    /// Body text.
    pub const SLATE: Color = Color::rgb(0x34, 0x49, 0x5E);
    /// Date and custom-field text.
    pub const GRAY: Color = Color::rgb(0x7F, 0x8C, 0x8D);
    /// Grade badge fill.
    pub const GREEN: Color = Color::rgb(0x27, 0xAE, 0x60);
    /// Title drop shadow.
    pub const SHADOW: Color = NAVY.with_alpha(0x48);
}
