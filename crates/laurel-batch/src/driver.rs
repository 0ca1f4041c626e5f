//! The batch loop: one certificate per recipient row.
//!
//! ```text
//! RecipientTable ─┬─► Recipient::fields ─► CertificateRenderer ─► Renderer ─► PNG
//!                 │                              ▲
//! template ───────┴──────────────────────────────┘
//! (generated per row, or a copy of the static backdrop)
//! ```
//!
//! Records are processed in file order and the first error stops the batch.
//! Files written before the failure are left in place.

use std::fs;
use std::path::{Path, PathBuf};

use laurel_common::image::LoadedImage;
use laurel_common::warning::warn_once;
use laurel_paint::{Canvas, CertificateRenderer, TemplateBuilder};
use laurel_render::{FontBook, RenderError, Renderer, load_backdrop, save_png};

use crate::BatchError;
use crate::config::{CanvasConfig, Config};
use crate::filename::certificate_filename;
use crate::records::RecipientTable;

/// A certificate that has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Recipient name as it appears on the certificate.
    pub name: String,
    /// Where the PNG was written.
    pub path: PathBuf,
}

/// Outcome of a completed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Written files, in row order.
    pub paths: Vec<PathBuf>,
    /// Absolute output directory.
    pub output_dir: PathBuf,
}

impl BatchSummary {
    /// Number of certificates written.
    #[must_use]
    pub fn count(&self) -> usize {
        self.paths.len()
    }
}

/// Renders and saves certificates for a whole table.
pub struct BatchDriver<'a> {
    config: Config,
    fonts: &'a FontBook,
    backdrop: Option<LoadedImage>,
}

impl<'a> BatchDriver<'a> {
    /// Prepare a batch, loading the static template if one is configured.
    ///
    /// A configured template that does not exist is reported once and the
    /// generated template is used instead.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Render`] if the template exists but cannot be
    /// read or decoded, or if the generated template would have a zero
    /// dimension.
    pub fn new(config: Config, fonts: &'a FontBook) -> Result<Self, BatchError> {
        let backdrop = match &config.template {
            Some(path) if path.exists() => Some(load_backdrop(path)?),
            Some(path) => {
                let _ = warn_once(
                    "template",
                    &format!(
                        "template '{}' not found; using the generated template",
                        path.display()
                    ),
                );
                None
            }
            None => None,
        };

        let CanvasConfig { width, height } = config.canvas;
        if backdrop.is_none() && (width == 0 || height == 0) {
            return Err(RenderError::InvalidSize { width, height }.into());
        }

        Ok(Self {
            config,
            fonts,
            backdrop,
        })
    }

    /// Whether a static template replaces the generated one.
    #[must_use]
    pub const fn uses_static_template(&self) -> bool {
        self.backdrop.is_some()
    }

    /// Write one certificate per row of `table`, calling `on_generated` after
    /// each file is saved.
    ///
    /// # Errors
    ///
    /// Stops at the first row that fails:
    /// - [`BatchError::OutputDir`] if the output directory cannot be created
    /// - [`BatchError::MissingField`] for a row without a name
    /// - [`BatchError::Render`] if rasterizing or saving fails
    pub fn run<F>(&self, table: &RecipientTable, mut on_generated: F) -> Result<BatchSummary, BatchError>
    where
        F: FnMut(&Generated),
    {
        let output_dir = self.prepare_output_dir()?;
        let certificates = CertificateRenderer::new(self.fonts);
        let renderer = Renderer::new(self.fonts);
        let mut paths = Vec::with_capacity(table.len());

        for recipient in table.records() {
            let fields = recipient.fields(&self.config.defaults)?;
            let canvas = certificates.render(&self.template(), &fields);
            let image = renderer.render(&canvas)?;

            let path = output_dir.join(certificate_filename(&fields.name, recipient.row()));
            save_png(&image, &path)?;

            let generated = Generated {
                name: fields.name,
                path,
            };
            on_generated(&generated);
            paths.push(generated.path);
        }

        Ok(BatchSummary { paths, output_dir })
    }

    /// A fresh template for one record.
    fn template(&self) -> Canvas {
        match &self.backdrop {
            Some(backdrop) => Canvas::from_backdrop(backdrop),
            None => TemplateBuilder::new(self.config.canvas.width, self.config.canvas.height).build(),
        }
    }

    fn prepare_output_dir(&self) -> Result<PathBuf, BatchError> {
        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|source| BatchError::OutputDir {
            path: dir.clone(),
            source,
        })?;
        Ok(absolute(dir))
    }
}

fn absolute(dir: &Path) -> PathBuf {
    fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}
