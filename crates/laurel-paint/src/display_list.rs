//! Display List - a sequence of drawing commands
//!
//! The display list is the z-stack of a canvas. Commands are stored in
//! painting order (back to front): a later command occludes an earlier one
//! wherever they overlap.

use crate::Color;
use crate::metrics::FontSpec;

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapePaint {
    /// Fill the interior with a solid color.
    Fill(Color),
    /// Stroke the outline, centered on the shape's edge.
    Stroke {
        /// Stroke color.
        color: Color,
        /// Stroke width in pixels.
        width: f32,
    },
}

/// A single drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// An axis-aligned rectangle.
    Rect {
        /// X coordinate of the top-left corner.
        x: f32,
        /// Y coordinate of the top-left corner.
        y: f32,
        /// Width in pixels.
        width: f32,
        /// Height in pixels.
        height: f32,
        /// Fill or stroke.
        paint: ShapePaint,
    },

    /// An axis-aligned rectangle with circular corners.
    ///
    /// The radius is clamped to half the shorter side when rasterized.
    RoundedRect {
        /// X coordinate of the top-left corner.
        x: f32,
        /// Y coordinate of the top-left corner.
        y: f32,
        /// Width in pixels.
        width: f32,
        /// Height in pixels.
        height: f32,
        /// Corner radius in pixels.
        radius: f32,
        /// Fill or stroke.
        paint: ShapePaint,
    },

    /// An axis-aligned ellipse.
    Ellipse {
        /// X coordinate of the center.
        cx: f32,
        /// Y coordinate of the center.
        cy: f32,
        /// Horizontal radius.
        rx: f32,
        /// Vertical radius.
        ry: f32,
        /// Fill or stroke.
        paint: ShapePaint,
    },

    /// A straight line segment with butt caps.
    Line {
        /// Start X.
        x1: f32,
        /// Start Y.
        y1: f32,
        /// End X.
        x2: f32,
        /// End Y.
        y2: f32,
        /// Line color.
        color: Color,
        /// Line width in pixels.
        width: f32,
    },

    /// A closed polygon through the given vertices.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<(f32, f32)>,
        /// Fill or stroke.
        paint: ShapePaint,
    },

    /// A single line of text.
    ///
    /// `(x, y)` is the top-left of the line box; the baseline sits at
    /// `y + font.size`.
    Text {
        /// X coordinate of the pen start.
        x: f32,
        /// Y coordinate of the top of the line box.
        y: f32,
        /// The text content to draw.
        text: String,
        /// Size and weight.
        font: FontSpec,
        /// Text color.
        color: Color,
    },
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command on top of everything drawn so far.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the text commands as `(x, y, text)`, in painting order.
    pub fn texts(&self) -> impl Iterator<Item = (f32, f32, &str)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { x, y, text, .. } => Some((*x, *y, text.as_str())),
            _ => None,
        })
    }
}
