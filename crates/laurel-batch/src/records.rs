//! Recipient records read from CSV.
//!
//! The whole file is parsed up front so that structural problems (a missing
//! `name` column, ragged rows, invalid UTF-8) are reported before anything is
//! written.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use laurel_paint::RecipientFields;

use crate::BatchError;
use crate::config::FieldDefaults;

/// Columns with a fixed place on the certificate. Every other column is a
/// custom field.
pub const STANDARD_COLUMNS: [&str; 4] = ["name", "course", "date", "grade"];

const NAME: &str = "name";

/// One data row: column name to value, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    row: usize,
    cells: Vec<(String, Option<String>)>,
}

impl Recipient {
    /// 1-based data row number.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Value of `column`, or `None` if the column is absent or the cell blank.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(key, _)| key == column)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Non-blank cells outside [`STANDARD_COLUMNS`], in column order.
    pub fn custom_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().filter_map(|(key, value)| {
            let value = value.as_deref()?;
            (!STANDARD_COLUMNS.contains(&key.as_str())).then_some((key.as_str(), value))
        })
    }

    /// Resolve this row into renderer input, filling gaps from `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::MissingField`] if the row has no name.
    pub fn fields(&self, defaults: &FieldDefaults) -> Result<RecipientFields, BatchError> {
        let name = self.get(NAME).ok_or(BatchError::MissingField {
            row: self.row,
            column: NAME,
        })?;

        let mut fields = RecipientFields::new(
            name,
            self.get("course").unwrap_or(defaults.course.as_str()),
            self.get("date").unwrap_or(defaults.date.as_str()),
        );
        if let Some(grade) = self.get("grade") {
            fields = fields.with_grade(grade);
        }
        for (key, value) in self.custom_fields() {
            fields = fields.with_custom_field(key, value);
        }
        Ok(fields)
    }
}

/// All rows of an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientTable {
    columns: Vec<String>,
    records: Vec<Recipient>,
}

impl RecipientTable {
    /// Read the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// - [`BatchError::InputNotFound`] if `path` does not exist
    /// - [`BatchError::MissingColumn`] if the header has no `name` column
    /// - [`BatchError::Csv`] for unreadable or malformed input
    pub fn from_path(path: &Path) -> Result<Self, BatchError> {
        if !path.exists() {
            return Err(BatchError::InputNotFound(path.to_path_buf()));
        }
        let reader = std::fs::File::open(path).map_err(|e| BatchError::Csv {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        Self::parse(reader, path)
    }

    /// Read CSV text from any reader.
    ///
    /// # Errors
    ///
    /// Same as [`RecipientTable::from_path`], minus the existence check.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BatchError> {
        Self::parse(reader, Path::new("<input>"))
    }

    fn parse<R: Read>(reader: R, path: &Path) -> Result<Self, BatchError> {
        let csv_error = |source| BatchError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = ReaderBuilder::new()
            .trim(Trim::Headers)
            .from_reader(reader);
        let columns: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        if !columns.iter().any(|column| column == NAME) {
            return Err(BatchError::MissingColumn(NAME));
        }

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(csv_error)?;
            let cells = columns
                .iter()
                .zip(record.iter())
                .map(|(column, value)| {
                    let value = (!value.trim().is_empty()).then(|| value.to_string());
                    (column.clone(), value)
                })
                .collect();
            records.push(Recipient {
                row: index + 1,
                cells,
            });
        }

        Ok(Self { columns, records })
    }

    /// Header names, in file order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows, in file order.
    #[must_use]
    pub fn records(&self) -> &[Recipient] {
        &self.records
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the file had no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
