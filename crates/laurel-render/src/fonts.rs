//! Font resolution and glyph rasterization.
//!
//! Fonts are picked from an explicit, ordered candidate list per weight. The
//! first file that loads wins; if none do, text falls back to a built-in 8×8
//! bitmap font scaled to the requested size, so a certificate always gets
//! its text even on a machine with no usable font files.
//!
//! Resolution order:
//! - regular: `regular` candidates, then the bitmap font
//! - bold: `bold` candidates, then `regular` candidates, then the bitmap font

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use fontdue::{Font, FontSettings};
use laurel_common::warning::{note, warn_once};
use laurel_paint::{FontSpec, FontWeight, TextMeasure};
use serde::Deserialize;
use thiserror::Error;

/// Common system font paths for the regular face.
const REGULAR_FONT_PATHS: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // macOS
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\calibri.ttf",
    "C:\\Windows\\Fonts\\times.ttf",
];

/// Common system font paths for the bold face.
const BOLD_FONT_PATHS: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    // macOS
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\calibrib.ttf",
    "C:\\Windows\\Fonts\\timesbd.ttf",
];

/// Side length of a bitmap glyph cell before scaling.
const BITMAP_CELL: usize = 8;

/// Ordered font file candidates per weight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontCandidates {
    /// Candidates for regular text.
    pub regular: Vec<PathBuf>,
    /// Candidates for bold text, tried before `regular`.
    pub bold: Vec<PathBuf>,
}

impl Default for FontCandidates {
    fn default() -> Self {
        Self {
            regular: REGULAR_FONT_PATHS.iter().map(PathBuf::from).collect(),
            bold: BOLD_FONT_PATHS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl FontCandidates {
    /// No candidates at all: every weight resolves to the bitmap font.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            regular: Vec::new(),
            bold: Vec::new(),
        }
    }

    /// Try `path` before every other candidate for `weight`.
    pub fn prefer(&mut self, weight: FontWeight, path: PathBuf) {
        let list = match weight {
            FontWeight::Regular => &mut self.regular,
            FontWeight::Bold => &mut self.bold,
        };
        list.insert(0, path);
    }
}

/// Why a candidate font file was skipped.
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// The file does not exist. Expected for most platform candidates.
    #[error("'{}' does not exist", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// Candidate path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file was read but is not a usable font.
    #[error("'{}' is not a usable font: {reason}", .path.display())]
    Parse {
        /// Candidate path.
        path: PathBuf,
        /// Parser message.
        reason: &'static str,
    },
}

/// Load a single font file.
///
/// # Errors
///
/// Returns [`FontLoadError::NotFound`] if the file is missing,
/// [`FontLoadError::Io`] for any other read failure, and
/// [`FontLoadError::Parse`] if the bytes are not a font.
pub fn load_font(path: &Path) -> Result<Font, FontLoadError> {
    let data = fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            FontLoadError::NotFound(path.to_path_buf())
        } else {
            FontLoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    Font::from_bytes(data, FontSettings::default()).map_err(|reason| FontLoadError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Try a list of candidates in order.
///
/// Missing files are skipped silently; anything else is worth a warning
/// because the user (or the configuration) probably meant that file.
fn load_first<'p>(paths: impl IntoIterator<Item = &'p PathBuf>, label: &str) -> Option<Font> {
    for path in paths {
        match load_font(path) {
            Ok(font) => {
                note("fonts", &format!("loaded {label} font: {}", path.display()));
                return Some(font);
            }
            Err(FontLoadError::NotFound(_)) => {}
            Err(err) => {
                let _ = warn_once("fonts", &format!("skipping {label} font: {err}"));
            }
        }
    }
    None
}

/// A rasterized glyph: coverage bitmap plus placement metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Offset of the bitmap's left edge from the pen position.
    pub xmin: i32,
    /// Offset of the bitmap's bottom edge above the baseline.
    pub ymin: i32,
    /// Bitmap width in pixels.
    pub width: usize,
    /// Bitmap height in pixels.
    pub height: usize,
    /// Row-major coverage, one byte per pixel (0 = empty, 255 = solid).
    pub coverage: Vec<u8>,
    /// Horizontal pen advance after this glyph.
    pub advance: f32,
}

/// A resolved font face.
pub enum Face {
    /// A TrueType/OpenType font loaded from disk.
    Outline(Box<Font>),
    /// The built-in 8×8 bitmap font, scaled by whole pixels.
    Bitmap,
}

impl Face {
    /// Integer scale that brings an 8-pixel cell closest to `size`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn bitmap_scale(size: f32) -> usize {
        ((size / BITMAP_CELL as f32).round() as usize).max(1)
    }

    /// Placement of `ch` at `size` pixels without rasterizing it: bitmap
    /// offset from the pen, bitmap width, and pen advance.
    #[allow(clippy::cast_precision_loss)]
    fn placement(&self, ch: char, size: f32) -> (i32, usize, f32) {
        match self {
            Self::Outline(font) => {
                let metrics = font.metrics(ch, size);
                (metrics.xmin, metrics.width, metrics.advance_width)
            }
            Self::Bitmap => {
                let side = BITMAP_CELL * Self::bitmap_scale(size);
                (0, side, side as f32)
            }
        }
    }

    /// Width of the box enclosing every glyph bitmap of `text`, laid out
    /// with the same pen movement as [`crate::Renderer`].
    ///
    /// Leading and trailing side bearings are not counted, so for outline
    /// fonts this is usually a little less than the sum of advances.
    #[must_use]
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        ink_width(
            text.chars()
                .filter(|ch| !ch.is_control())
                .map(|ch| self.placement(ch, size)),
        )
    }

    /// Rasterize `ch` at `size` pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rasterize(&self, ch: char, size: f32) -> Glyph {
        match self {
            Self::Outline(font) => {
                let (metrics, coverage) = font.rasterize(ch, size);
                Glyph {
                    xmin: metrics.xmin,
                    ymin: metrics.ymin,
                    width: metrics.width,
                    height: metrics.height,
                    coverage,
                    advance: metrics.advance_width,
                }
            }
            Self::Bitmap => {
                let scale = Self::bitmap_scale(size);
                let side = BITMAP_CELL * scale;
                let rows = bitmap_rows(ch);
                let mut coverage = vec![0; side * side];
                for (y, pixel_row) in coverage.chunks_exact_mut(side).enumerate() {
                    let bits = rows[y / scale];
                    for (x, pixel) in pixel_row.iter_mut().enumerate() {
                        // Bit 0 is the leftmost column.
                        if bits & (1 << (x / scale)) != 0 {
                            *pixel = 255;
                        }
                    }
                }
                Glyph {
                    xmin: 0,
                    ymin: 0,
                    width: side,
                    height: side,
                    coverage,
                    advance: side as f32,
                }
            }
        }
    }
}

/// Horizontal extent of a run of glyph placements, from the leftmost bitmap
/// edge to the rightmost. Empty bitmaps (spaces) only move the pen.
#[allow(clippy::cast_precision_loss)]
fn ink_width(placements: impl Iterator<Item = (i32, usize, f32)>) -> f32 {
    let mut pen = 0.0;
    let mut extent: Option<(f32, f32)> = None;
    for (xmin, width, advance) in placements {
        if width > 0 {
            let left = pen + xmin as f32;
            let right = left + width as f32;
            extent = Some(extent.map_or((left, right), |(l, r)| (l.min(left), r.max(right))));
        }
        pen += advance;
    }
    extent.map_or(0.0, |(left, right)| right - left)
}

/// The 8×8 rows for `ch`, with `?` standing in for unknown characters.
fn bitmap_rows(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// The resolved regular and bold faces for a batch.
pub struct FontBook {
    regular: Face,
    bold: Face,
}

impl FontBook {
    /// Resolve both weights from `candidates`.
    ///
    /// Never fails: a weight with no loadable candidate uses the bitmap font.
    #[must_use]
    pub fn load(candidates: &FontCandidates) -> Self {
        let regular = load_first(&candidates.regular, "regular");
        let bold = load_first(
            candidates.bold.iter().chain(&candidates.regular),
            "bold",
        );

        if regular.is_none() {
            let _ = warn_once(
                "fonts",
                "no usable font file found; using the built-in bitmap font",
            );
        }

        Self {
            regular: regular.map_or(Face::Bitmap, |font| Face::Outline(Box::new(font))),
            bold: bold.map_or(Face::Bitmap, |font| Face::Outline(Box::new(font))),
        }
    }

    /// A font book that only uses the built-in bitmap font.
    ///
    /// Output is identical on every machine, which makes it the font book
    /// for tests.
    #[must_use]
    pub const fn bitmap() -> Self {
        Self {
            regular: Face::Bitmap,
            bold: Face::Bitmap,
        }
    }

    /// The face used for `weight`.
    #[must_use]
    pub const fn face(&self, weight: FontWeight) -> &Face {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

impl TextMeasure for FontBook {
    fn text_width(&self, text: &str, font: FontSpec) -> f32 {
        self.face(font.weight).text_width(text, font.size)
    }
}
