//! Run configuration.
//!
//! Everything a batch needs besides the CSV itself, loadable from a TOML
//! file. Every key is optional; anything omitted keeps its built-in default,
//! so an empty file is a valid configuration.
//!
//! ```toml
//! output_dir = "certificates"
//! template = "background.png"
//!
//! [canvas]
//! width = 1400
//! height = 1000
//!
//! [defaults]
//! course = "Course Completion"
//! date = "November 2, 2025"
//!
//! [fonts]
//! regular = ["/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"]
//! bold = ["/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"]
//! ```

use std::path::{Path, PathBuf};

use laurel_paint::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use laurel_render::FontCandidates;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    /// The file is not valid TOML or has unknown/mistyped keys.
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Generated-template size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Values used when a row has no `course` or `date`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldDefaults {
    /// Course shown when the row has none.
    pub course: String,
    /// Date shown when the row has none.
    pub date: String,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            course: "Course Completion".to_string(),
            date: "November 2, 2025".to_string(),
        }
    }
}

/// Complete batch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory certificates are written to; created if absent.
    pub output_dir: PathBuf,
    /// Static backdrop used instead of the generated template.
    pub template: Option<PathBuf>,
    /// Generated-template size.
    pub canvas: CanvasConfig,
    /// Fallbacks for missing optional columns.
    pub defaults: FieldDefaults,
    /// Font files to try, per weight.
    pub fonts: FontCandidates,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("certificates"),
            template: None,
            canvas: CanvasConfig::default(),
            defaults: FieldDefaults::default(),
            fonts: FontCandidates::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] on invalid TOML or unknown keys.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("certificates"));
        assert_eq!((config.canvas.width, config.canvas.height), (1400, 1000));
        assert_eq!(config.defaults.course, "Course Completion");
        assert_eq!(config.defaults.date, "November 2, 2025");
        assert!(config.template.is_none());
        assert!(!config.fonts.regular.is_empty());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
template = "frame.svg"

[canvas]
width = 2000

[defaults]
date = "2026-06-30"

[fonts]
bold = ["/opt/fonts/Serif-Bold.ttf"]
"#,
        )
        .unwrap();
        assert_eq!(config.template, Some(PathBuf::from("frame.svg")));
        assert_eq!((config.canvas.width, config.canvas.height), (2000, 1000));
        assert_eq!(config.defaults.course, "Course Completion");
        assert_eq!(config.defaults.date, "2026-06-30");
        assert_eq!(config.fonts.bold, vec![PathBuf::from("/opt/fonts/Serif-Bold.ttf")]);
        assert_eq!(config.fonts.regular, FontCandidates::default().regular);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml("outptu_dir = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_file(Path::new("/no/such/laurel.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
