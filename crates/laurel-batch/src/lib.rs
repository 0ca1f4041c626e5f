//! Batch certificate generation.
//!
//! # Scope
//!
//! This crate ties the pipeline together for a whole CSV file:
//! - **Configuration** - `laurel.toml` with output, canvas, default-field,
//!   and font settings
//! - **Records** - header validation and per-row field extraction
//! - **File Naming** - filesystem-safe names derived from recipient names
//! - **Driver** - render and save one certificate per row, in order

pub mod config;
pub mod driver;
pub mod filename;
pub mod records;

pub use config::{CanvasConfig, Config, ConfigError, FieldDefaults};
pub use driver::{BatchDriver, BatchSummary, Generated};
pub use filename::{CERTIFICATE_SUFFIX, certificate_filename, sanitize_name};
pub use records::{Recipient, RecipientTable, STANDARD_COLUMNS};

use std::path::PathBuf;

use laurel_render::RenderError;
use thiserror::Error;

/// Errors that stop a batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The input file does not exist.
    #[error("CSV file '{}' not found", .0.display())]
    InputNotFound(PathBuf),
    /// The input could not be parsed as CSV.
    #[error("failed to read CSV '{}': {source}", .path.display())]
    Csv {
        /// Input path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: csv::Error,
    },
    /// The header row lacks a required column.
    #[error("CSV header is missing the required '{0}' column")]
    MissingColumn(&'static str),
    /// A row has no value for a required column.
    #[error("row {row} has no value for the required '{column}' column")]
    MissingField {
        /// 1-based data row number (the header is row 0).
        row: usize,
        /// Column name.
        column: &'static str,
    },
    /// The output directory could not be created.
    #[error("failed to create output directory '{}': {source}", .path.display())]
    OutputDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Loading the template, rasterizing, or saving failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}
