//! The drawing surface a certificate is composed on.

use laurel_common::image::LoadedImage;

use crate::display_list::{DisplayList, DrawCommand, ShapePaint};
use crate::metrics::FontSpec;
use crate::Color;

/// A fixed-size drawing surface.
///
/// A canvas is an optional backdrop image plus a display list drawn over it.
/// Nothing is rasterized until the canvas reaches `laurel-render`, so a
/// canvas is cheap to clone and can be compared for equality.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    backdrop: Option<LoadedImage>,
    display_list: DisplayList,
}

impl Canvas {
    /// Create an empty canvas with no backdrop.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            backdrop: None,
            display_list: DisplayList::new(),
        }
    }

    /// Create a canvas over a copy of `image`, sized to the image.
    ///
    /// The caller's image is never touched by anything drawn afterwards.
    #[must_use]
    pub fn from_backdrop(image: &LoadedImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            backdrop: Some(image.clone()),
            display_list: DisplayList::new(),
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The backdrop image painted before any command, if any.
    #[must_use]
    pub const fn backdrop(&self) -> Option<&LoadedImage> {
        self.backdrop.as_ref()
    }

    /// The commands drawn over the backdrop, back to front.
    #[must_use]
    pub const fn display_list(&self) -> &DisplayList {
        &self.display_list
    }

    /// Append a raw command.
    pub fn push(&mut self, command: DrawCommand) {
        self.display_list.push(command);
    }

    /// Draw an axis-aligned rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: ShapePaint) {
        self.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            paint,
        });
    }

    /// Draw a rectangle with rounded corners.
    pub fn rounded_rect(
        &mut self,
        (x, y): (f32, f32),
        (width, height): (f32, f32),
        radius: f32,
        paint: ShapePaint,
    ) {
        self.push(DrawCommand::RoundedRect {
            x,
            y,
            width,
            height,
            radius,
            paint,
        });
    }

    /// Draw an ellipse centered on `(cx, cy)`.
    pub fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, paint: ShapePaint) {
        self.push(DrawCommand::Ellipse {
            cx,
            cy,
            rx,
            ry,
            paint,
        });
    }

    /// Draw a line segment.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        self.push(DrawCommand::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color,
            width,
        });
    }

    /// Draw a closed polygon.
    pub fn polygon(&mut self, points: Vec<(f32, f32)>, paint: ShapePaint) {
        self.push(DrawCommand::Polygon { points, paint });
    }

    /// Draw a line of text with its line box's top-left at `(x, y)`.
    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, font: FontSpec, color: Color) {
        self.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            font,
            color,
        });
    }
}
