//! Software renderer for certificate canvases.
//!
//! Executes a canvas's display list to a pixel buffer: shapes go through
//! tiny-skia (anti-aliased fills and strokes), text is blended glyph by glyph
//! from the [`FontBook`].
//!
//! ```text
//! Template → Certificate layout → Render
//!                  ↓                 ↓
//!            DisplayList     →     Pixels → PNG
//! ```
//!
//! The renderer knows nothing about recipients or layout. It simply executes
//! drawing commands, back to front.

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use laurel_common::image::LoadedImage;
use laurel_paint::{Canvas, Color, DrawCommand, FontSpec, ShapePaint};
use tiny_skia::{
    ColorU8, FillRule, LineCap, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Rect, Stroke,
    Transform,
};

use crate::RenderError;
use crate::fonts::FontBook;

/// Cubic Bézier handle length for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// Executes canvases into RGBA images using a shared [`FontBook`].
pub struct Renderer<'a> {
    fonts: &'a FontBook,
}

impl<'a> Renderer<'a> {
    /// Create a renderer drawing text with `fonts`.
    #[must_use]
    pub const fn new(fonts: &'a FontBook) -> Self {
        Self { fonts }
    }

    /// Rasterize `canvas` into a fresh image.
    ///
    /// The backdrop (or plain white, without one) is painted first, then every
    /// command in painting order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSize`] if the canvas cannot be allocated.
    pub fn render(&self, canvas: &Canvas) -> Result<RgbaImage, RenderError> {
        let invalid = || RenderError::InvalidSize {
            width: canvas.width(),
            height: canvas.height(),
        };
        let mut pixmap = Pixmap::new(canvas.width(), canvas.height()).ok_or_else(invalid)?;

        match canvas.backdrop() {
            Some(backdrop) => paint_backdrop(&mut pixmap, backdrop),
            None => pixmap.fill(tiny_skia::Color::WHITE),
        }

        for command in canvas.display_list().commands() {
            self.execute_command(&mut pixmap, command);
        }

        RgbaImage::from_raw(canvas.width(), canvas.height(), demultiplied(&pixmap))
            .ok_or_else(invalid)
    }

    /// Execute a single display command.
    fn execute_command(&self, pixmap: &mut Pixmap, command: &DrawCommand) {
        match command {
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                paint,
            } => {
                if let Some(rect) = Rect::from_xywh(*x, *y, *width, *height) {
                    draw_path(pixmap, &PathBuilder::from_rect(rect), *paint);
                }
            }
            DrawCommand::RoundedRect {
                x,
                y,
                width,
                height,
                radius,
                paint,
            } => {
                if let Some(path) = rounded_rect_path(*x, *y, *width, *height, *radius) {
                    draw_path(pixmap, &path, *paint);
                }
            }
            DrawCommand::Ellipse {
                cx,
                cy,
                rx,
                ry,
                paint,
            } => {
                if let Some(path) = Rect::from_xywh(cx - rx, cy - ry, 2.0 * rx, 2.0 * ry)
                    .and_then(PathBuilder::from_oval)
                {
                    draw_path(pixmap, &path, *paint);
                }
            }
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
            } => {
                let mut builder = PathBuilder::new();
                builder.move_to(*x1, *y1);
                builder.line_to(*x2, *y2);
                if let Some(path) = builder.finish() {
                    let stroke = Stroke {
                        width: *width,
                        line_cap: LineCap::Butt,
                        ..Stroke::default()
                    };
                    pixmap.stroke_path(&path, &paint_for(*color), &stroke, Transform::identity(), None);
                }
            }
            DrawCommand::Polygon { points, paint } => {
                if let Some(path) = polygon_path(points) {
                    draw_path(pixmap, &path, *paint);
                }
            }
            DrawCommand::Text {
                x,
                y,
                text,
                font,
                color,
            } => {
                self.draw_text(pixmap, text, *x, *y, *font, *color);
            }
        }
    }

    /// Draw a line of text with its line box's top-left at `(x, y)`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    fn draw_text(&self, pixmap: &mut Pixmap, text: &str, x: f32, y: f32, font: FontSpec, color: Color) {
        let face = self.fonts.face(font.weight);
        let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);
        let stride = pixmap.width() as usize;
        let pixels = pixmap.pixels_mut();
        let baseline = y + font.size;
        let mut cursor_x = x;

        for ch in text.chars() {
            if ch.is_control() {
                continue;
            }

            let glyph = face.rasterize(ch, font.size);
            let glyph_x = cursor_x.round() as i32 + glyph.xmin;
            let glyph_y = baseline.round() as i32 - glyph.ymin - glyph.height as i32;

            for gy in 0..glyph.height {
                for gx in 0..glyph.width {
                    let coverage = glyph.coverage[gy * glyph.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let px = glyph_x + gx as i32;
                    let py = glyph_y + gy as i32;
                    if px < 0 || py < 0 || px >= width || py >= height {
                        continue;
                    }
                    let idx = py as usize * stride + px as usize;
                    pixels[idx] = blend(pixels[idx], color, coverage);
                }
            }

            cursor_x += glyph.advance;
        }
    }
}

/// Encode `image` as PNG at `path`.
///
/// # Errors
///
/// Returns [`RenderError::Save`] if the file cannot be written.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), RenderError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| RenderError::Save {
            path: path.to_path_buf(),
            source,
        })
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn draw_path(pixmap: &mut Pixmap, path: &tiny_skia::Path, paint: ShapePaint) {
    match paint {
        ShapePaint::Fill(color) => {
            pixmap.fill_path(
                path,
                &paint_for(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
        ShapePaint::Stroke { color, width } => {
            let stroke = Stroke {
                width,
                ..Stroke::default()
            };
            pixmap.stroke_path(path, &paint_for(color), &stroke, Transform::identity(), None);
        }
    }
}

fn polygon_path(points: &[(f32, f32)]) -> Option<tiny_skia::Path> {
    let ((first_x, first_y), rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(*first_x, *first_y);
    for (x, y) in rest {
        builder.line_to(*x, *y);
    }
    builder.close();
    builder.finish()
}

/// A rectangle with quarter-circle corners, approximated by cubics.
fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<tiny_skia::Path> {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    let k = KAPPA * r;
    let (right, bottom) = (x + w, y + h);

    let mut builder = PathBuilder::new();
    builder.move_to(x + r, y);
    builder.line_to(right - r, y);
    builder.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    builder.line_to(right, bottom - r);
    builder.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    builder.line_to(x + r, bottom);
    builder.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    builder.line_to(x, y + r);
    builder.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    builder.close();
    builder.finish()
}

/// Copy a straight-alpha backdrop into a premultiplied pixmap of equal size.
fn paint_backdrop(pixmap: &mut Pixmap, backdrop: &LoadedImage) {
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(backdrop.rgba_data().chunks_exact(4))
    {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
}

/// The pixmap's pixels as straight RGBA bytes.
fn demultiplied(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let c = pixel.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

/// Source-over blend of `color` at `coverage` onto a premultiplied pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(dst: PremultipliedColorU8, color: Color, coverage: u8) -> PremultipliedColorU8 {
    let alpha = f32::from(coverage) / 255.0 * f32::from(color.a) / 255.0;
    let inv = 1.0 - alpha;
    let mix = |src: u8, dst: u8| f32::from(src).mul_add(alpha, f32::from(dst) * inv).round() as u8;

    let a = mix(255, dst.alpha());
    PremultipliedColorU8::from_rgba(
        mix(color.r, dst.red()).min(a),
        mix(color.g, dst.green()).min(a),
        mix(color.b, dst.blue()).min(a),
        a,
    )
    .unwrap_or(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque(r: u8, g: u8, b: u8) -> PremultipliedColorU8 {
        PremultipliedColorU8::from_rgba(r, g, b, 255).unwrap()
    }

    #[test]
    fn test_blend_full_coverage_replaces() {
        let out = blend(opaque(255, 255, 255), Color::rgb(10, 20, 30), 255);
        assert_eq!(out, opaque(10, 20, 30));
    }

    #[test]
    fn test_blend_zero_coverage_keeps() {
        let dst = opaque(1, 2, 3);
        assert_eq!(blend(dst, Color::rgb(200, 200, 200), 0), dst);
    }

    #[test]
    fn test_blend_half_coverage_mixes() {
        let out = blend(opaque(0, 0, 0), Color::WHITE, 128);
        assert!((126..=130).contains(&out.red()));
        assert_eq!(out.alpha(), 255);
    }

    #[test]
    fn test_rounded_rect_clamps_radius() {
        let path = rounded_rect_path(0.0, 0.0, 100.0, 20.0, 50.0).unwrap();
        let bounds = path.bounds();
        assert!((bounds.width() - 100.0).abs() < 1e-3);
        assert!((bounds.height() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_polygon_needs_points() {
        assert!(polygon_path(&[]).is_none());
        assert!(polygon_path(&[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]).is_some());
    }
}
