//! Template construction and certificate layout for Laurel.
//!
//! # Scope
//!
//! This crate turns recipient data into drawing commands. It knows nothing
//! about pixels, font files, or image formats:
//!
//! ```text
//! TemplateBuilder → Canvas → CertificateRenderer → Canvas → (laurel-render) → PNG
//! ```
//!
//! - **Canvas** - fixed-size surface holding an optional backdrop and an
//!   ordered display list
//! - **Template** - the decorative, data-independent background
//! - **Certificate** - the fixed-position text layout for one recipient
//! - **Metrics** - the text measurement seam shared with the rasterizer

/// Drawing surface made of a backdrop and a display list.
pub mod canvas;
/// Certificate text layout for a single recipient.
pub mod certificate;
/// sRGB colors and the certificate palette.
pub mod color;
/// Drawing commands in painting order.
pub mod display_list;
/// Font descriptors, text measurement, and centering.
pub mod metrics;
/// Decorative certificate template.
pub mod template;

pub use canvas::Canvas;
pub use certificate::{CUSTOM_FIELD_STEP, CertificateRenderer, GRADE_BADGE_OFFSET, RecipientFields};
pub use color::Color;
pub use display_list::{DisplayList, DrawCommand, ShapePaint};
pub use metrics::{ApproximateTextMeasure, FontSpec, FontWeight, TextMeasure, centered_x};
pub use template::{DEFAULT_HEIGHT, DEFAULT_WIDTH, TemplateBuilder};
