//! Decorative certificate template.
//!
//! The template is the data-independent background every certificate is
//! drawn on: paper fill, three nested frames, corner ornaments, and the
//! accent bar under the title. Every coordinate is a fixed offset from the
//! canvas edges or its horizontal center, so the same size always produces
//! the same display list.

use crate::{Canvas, Color};
use crate::color::palette;
use crate::display_list::ShapePaint;

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: u32 = 1400;

/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: u32 = 1000;

/// A frame: inset of its outer edge from the canvas edge, and stroke width.
struct Frame {
    inset: f32,
    stroke: f32,
    color: Color,
}

/// Outer frame, then the two inner frames, back to front.
const FRAMES: [Frame; 3] = [
    Frame {
        inset: 20.0,
        stroke: 16.0,
        color: palette::NAVY,
    },
    Frame {
        inset: 48.0,
        stroke: 4.0,
        color: palette::GOLD,
    },
    Frame {
        inset: 60.0,
        stroke: 2.0,
        color: palette::NAVY,
    },
];

/// Distance of each ornament's center from the two nearest canvas edges.
const ORNAMENT_OFFSET: (f32, f32) = (100.0, 100.0);
const ORNAMENT_RADII: (f32, f32) = (26.0, 18.0);
const ORNAMENT_RING: f32 = 3.0;
/// How far the crosshair arms reach past the ellipse.
const CROSSHAIR_OVERHANG: f32 = 10.0;
const CROSSHAIR_WIDTH: f32 = 2.0;

/// Top of the accent bar under the title region.
pub const ACCENT_BAR_Y: f32 = 258.0;
const ACCENT_BAR_WIDTH: f32 = 420.0;
const ACCENT_BAR_HEIGHT: f32 = 4.0;
/// Gap between a bar end and the center of its diamond.
const DIAMOND_GAP: f32 = 18.0;
const DIAMOND_HALF: f32 = 9.0;

/// Builds the blank decorated template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateBuilder {
    width: u32,
    height: u32,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl TemplateBuilder {
    /// A builder for a `width` × `height` template.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build the template.
    ///
    /// Painting order: background, outer frame, inner frames, corner
    /// ornaments, accent bar, diamonds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn build(&self) -> Canvas {
        let mut canvas = Canvas::new(self.width, self.height);
        let (w, h) = (self.width as f32, self.height as f32);

        canvas.rect(0.0, 0.0, w, h, ShapePaint::Fill(palette::PAPER));

        for frame in &FRAMES {
            // Strokes straddle the path, so move the path half a stroke
            // inwards to keep the frame's outer edge at `inset`.
            let edge = frame.inset + frame.stroke / 2.0;
            canvas.rect(
                edge,
                edge,
                w - 2.0 * edge,
                h - 2.0 * edge,
                ShapePaint::Stroke {
                    color: frame.color,
                    width: frame.stroke,
                },
            );
        }

        for (cx, cy) in ornament_centers(w, h) {
            draw_ornament(&mut canvas, cx, cy);
        }

        let bar_left = (w - ACCENT_BAR_WIDTH) / 2.0;
        let bar_right = bar_left + ACCENT_BAR_WIDTH;
        canvas.rect(
            bar_left,
            ACCENT_BAR_Y,
            ACCENT_BAR_WIDTH,
            ACCENT_BAR_HEIGHT,
            ShapePaint::Fill(palette::GOLD),
        );

        let bar_mid = ACCENT_BAR_Y + ACCENT_BAR_HEIGHT / 2.0;
        for cx in [bar_left - DIAMOND_GAP, bar_right + DIAMOND_GAP] {
            canvas.polygon(diamond(cx, bar_mid), ShapePaint::Fill(palette::NAVY));
        }

        canvas
    }
}

/// One offset reflected into all four corners: top-left, top-right,
/// bottom-left, bottom-right.
fn ornament_centers(w: f32, h: f32) -> [(f32, f32); 4] {
    let (dx, dy) = ORNAMENT_OFFSET;
    [(dx, dy), (w - dx, dy), (dx, h - dy), (w - dx, h - dy)]
}

fn draw_ornament(canvas: &mut Canvas, cx: f32, cy: f32) {
    let (rx, ry) = ORNAMENT_RADII;
    canvas.ellipse(cx, cy, rx, ry, ShapePaint::Fill(palette::GOLD_LIGHT));
    canvas.ellipse(
        cx,
        cy,
        rx,
        ry,
        ShapePaint::Stroke {
            color: palette::GOLD,
            width: ORNAMENT_RING,
        },
    );

    let arm_x = rx + CROSSHAIR_OVERHANG;
    let arm_y = ry + CROSSHAIR_OVERHANG;
    canvas.line(
        (cx - arm_x, cy),
        (cx + arm_x, cy),
        palette::NAVY,
        CROSSHAIR_WIDTH,
    );
    canvas.line(
        (cx, cy - arm_y),
        (cx, cy + arm_y),
        palette::NAVY,
        CROSSHAIR_WIDTH,
    );
}

fn diamond(cx: f32, cy: f32) -> Vec<(f32, f32)> {
    vec![
        (cx, cy - DIAMOND_HALF),
        (cx + DIAMOND_HALF, cy),
        (cx, cy + DIAMOND_HALF),
        (cx - DIAMOND_HALF, cy),
    ]
}
