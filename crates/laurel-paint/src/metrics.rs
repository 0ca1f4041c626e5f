//! Font descriptors and text measurement.
//!
//! Layout never touches font files. It asks a [`TextMeasure`] for the width
//! of a string, and the rasterizer implements the same trait over the fonts
//! it actually draws with, so measured and drawn widths agree.

/// Font weight. Certificates only use two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    /// Body text.
    #[default]
    Regular,
    /// Title, name, course, badge, and seal text.
    Bold,
}

/// A font descriptor: pixel size plus weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Font size in pixels.
    pub size: f32,
    /// Weight used to pick the face.
    pub weight: FontWeight,
}

impl FontSpec {
    /// A regular-weight font of the given size.
    #[must_use]
    pub const fn regular(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
        }
    }

    /// A bold font of the given size.
    #[must_use]
    pub const fn bold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
        }
    }
}

/// Trait for measuring text with a concrete font.
pub trait TextMeasure {
    /// Measure the rendered width of `text` in `font`: the horizontal
    /// extent of its glyph bitmaps when drawn with the usual pen advance.
    fn text_width(&self, text: &str, font: FontSpec) -> f32;
}

/// Approximate text measurement using fixed ratios.
///
/// The average advance width of Latin glyphs in a proportional font is
/// roughly 0.6× the font size; bold faces run a little wider. Used in tests
/// and wherever layout must not depend on installed fonts.
pub struct ApproximateTextMeasure;

impl TextMeasure for ApproximateTextMeasure {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font: FontSpec) -> f32 {
        let ratio = match font.weight {
            FontWeight::Regular => 0.6,
            FontWeight::Bold => 0.65,
        };
        text.chars().filter(|ch| !ch.is_control()).count() as f32 * font.size * ratio
    }
}

/// Left edge that centers a line of `text_width` pixels on the canvas.
///
/// `x = (canvas_width − text_width) / 2`. Lines wider than the canvas get a
/// negative `x` and overflow both edges equally; nothing is wrapped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centered_x(canvas_width: u32, text_width: f32) -> f32 {
    (canvas_width as f32 - text_width) / 2.0
}
